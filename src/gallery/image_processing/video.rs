use crate::gallery::GenerationError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Grab the frame at timestamp zero of `input` as a JPEG at `output`.
///
/// The child is killed if it outlives `timeout`.
pub async fn extract_frame(
    ffmpeg: &Path,
    input: &Path,
    output: &Path,
    timeout: Duration,
) -> Result<PathBuf, GenerationError> {
    debug!("Extracting first frame of {:?} with {:?}", input, ffmpeg);

    let child = Command::new(ffmpeg)
        .args(frame_args(input, output))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| GenerationError::Spawn {
            program: ffmpeg.to_path_buf(),
            source,
        })?;

    let result = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => return Err(GenerationError::Timeout(timeout.as_secs())),
    };

    if !result.status.success() {
        return Err(GenerationError::FrameExtraction {
            status: result.status.to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    if !output.exists() {
        return Err(GenerationError::FrameExtraction {
            status: result.status.to_string(),
            stderr: "no frame written".to_string(),
        });
    }

    Ok(output.to_path_buf())
}

/// Single frame, no audio, from timestamp zero, overwriting `output`.
fn frame_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-hide_banner",
        "-loglevel",
        "error",
        "-nostdin",
        "-y",
        "-ss",
        "0",
        "-i",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(input.as_os_str().to_owned());
    args.extend(
        ["-frames:v", "1", "-an", "-f", "image2", "-c:v", "mjpeg"]
            .into_iter()
            .map(OsString::from),
    );
    args.push(output.as_os_str().to_owned());
    args
}
