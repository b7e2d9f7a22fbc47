use argh::FromArgs;
use std::{
    io::BufRead,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError},
        Arc,
    },
    time::Duration,
};
use tracklens::{io, FrameControl, FrameGate, OverlayConfig, OverlaySession, RenderedFrame};

#[derive(FromArgs)]
/// Overlay tracked boxes on a camera sequence and show them in Rerun
struct Args {
    /// path to the JSON frame sequence
    #[argh(option, short = 'f')]
    frames: PathBuf,

    /// directory the image paths of the sequence are relative to
    #[argh(option, short = 'i', default = "PathBuf::from(\".\")")]
    image_root: PathBuf,

    /// optional JSON overlay configuration
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// wait for enter after every frame, `q` or Ctrl-C stops
    #[argh(switch)]
    interactive: bool,
}

/// Logs every frame to Rerun and waits for the user in interactive mode.
struct ViewerGate {
    rec: rerun::RecordingStream,
    cancel_token: Arc<AtomicBool>,
    // lines typed on stdin, read on their own thread so Ctrl-C is not blocked
    lines: Option<Receiver<String>>,
}

impl ViewerGate {
    fn wait_for_user(&self, lines: &Receiver<String>) -> FrameControl {
        loop {
            if self.is_cancelled() {
                return FrameControl::Stop;
            }
            match lines.recv_timeout(Duration::from_millis(100)) {
                Ok(line) if line.trim() == "q" => return FrameControl::Stop,
                Ok(_) => return FrameControl::Continue,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return FrameControl::Stop,
            }
        }
    }
}

impl FrameGate for ViewerGate {
    fn on_frame(&mut self, frame: &RenderedFrame) -> FrameControl {
        if let Err(err) = log_frame(&self.rec, frame) {
            log::warn!("failed to log frame {}: {err}", frame.index);
        }

        match &self.lines {
            Some(lines) => {
                println!(
                    "frame {} ({} boxes), enter to continue, q to quit",
                    frame.index,
                    frame.summary.instances.len()
                );
                self.wait_for_user(lines)
            }
            None if self.is_cancelled() => FrameControl::Stop,
            None => FrameControl::Continue,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_token.load(Ordering::SeqCst)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => OverlayConfig::from_file(path)?,
        None => OverlayConfig::default(),
    };

    // a bad calibration must stop us before the first frame
    let calibration = config.calibration_model()?;
    let session = OverlaySession::new(config.frame_processor(&calibration), &args.image_root);

    let frames = io::read_frames(&args.frames)?;

    // start the recording stream
    let rec = rerun::RecordingStreamBuilder::new("Tracklens Overlay").spawn()?;

    let cancel_token = Arc::new(AtomicBool::new(false));

    ctrlc::set_handler({
        let cancel_token = cancel_token.clone();
        move || {
            println!("Received Ctrl-C signal. Sending cancel signal !!");
            cancel_token.store(true, Ordering::SeqCst);
        }
    })?;

    let lines = args.interactive.then(|| {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        rx
    });

    let mut gate = ViewerGate {
        rec,
        cancel_token,
        lines,
    };

    let summary = session.run(&frames, &mut gate);

    println!(
        "processed {} frames, {} failed{}",
        summary.processed,
        summary.failed,
        if summary.stopped { ", stopped early" } else { "" }
    );

    Ok(())
}

fn log_frame(
    rec: &rerun::RecordingStream,
    frame: &RenderedFrame,
) -> Result<(), Box<dyn std::error::Error>> {
    rec.log(
        "overlay/image",
        &rerun::Image::from_elements(
            frame.image.as_slice(),
            frame.image.size().into(),
            rerun::ColorModel::RGB,
        ),
    )?;

    let mask = frame.mask.cast_and_scale::<u8>(255.0)?;

    rec.log(
        "overlay/mask",
        &rerun::Image::from_elements(
            mask.as_slice(),
            mask.size().into(),
            rerun::ColorModel::L,
        ),
    )?;

    Ok(())
}
