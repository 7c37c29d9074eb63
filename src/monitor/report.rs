use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use crate::error::FlashError;

/// Location of the macOS system information tool.
pub const SYSTEM_PROFILER_PATH: &str = "/usr/sbin/system_profiler";

/// Arguments requesting the display report as JSON.
pub const SYSTEM_PROFILER_ARGS: [&str; 2] = ["SPDisplaysDataType", "-json"];

const DISPLAYS_KEY: &str = "SPDisplaysDataType";
const OUTPUTS_KEY: &str = "spdisplays_ndrvs";
const NAME_KEY: &str = "_name";
const DISPLAY_ID_KEY: &str = "_spdisplays_displayID";

/// Something that can produce a raw display report.
pub trait ReportSource {
    fn fetch(&self) -> Result<Vec<u8>>;
}

/// Runs `system_profiler` and hands back whatever it wrote to stdout.
#[derive(Debug, Default)]
pub struct SystemProfiler;

impl ReportSource for SystemProfiler {
    fn fetch(&self) -> Result<Vec<u8>> {
        // Blocks until the child exits. The exit status is not inspected.
        let output = Command::new(SYSTEM_PROFILER_PATH)
            .args(SYSTEM_PROFILER_ARGS)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("failed to launch {}", SYSTEM_PROFILER_PATH))?;
        log::debug!(
            "{} exited with {} ({} bytes)",
            SYSTEM_PROFILER_PATH,
            output.status,
            output.stdout.len()
        );
        Ok(output.stdout)
    }
}

/// Map a display name to its numeric display id.
///
/// Every failure, from a tool that will not start to a name that never
/// appears, is reported as [`FlashError::DisplayNameNotFound`].
pub fn resolve_display_id(target: &str, source: &dyn ReportSource) -> Result<u32, FlashError> {
    let lookup = source
        .fetch()
        .and_then(|raw| find_display_id(&raw, target));

    match lookup {
        Ok(id) => {
            log::info!("Display '{}' has id {}", target, id);
            Ok(id)
        }
        Err(e) => {
            log::debug!("Display lookup for '{}' failed: {:#}", target, e);
            Err(FlashError::DisplayNameNotFound(target.to_string()))
        }
    }
}

/// Scan a raw `SPDisplaysDataType` JSON report for `target`.
pub fn find_display_id(raw: &[u8], target: &str) -> Result<u32> {
    let report: Value = serde_json::from_slice(raw).context("display report is not valid JSON")?;
    let gpus = report
        .get(DISPLAYS_KEY)
        .and_then(object_list)
        .with_context(|| format!("display report has no '{}' list", DISPLAYS_KEY))?;

    gpus.into_iter()
        .filter_map(|gpu| gpu.get(OUTPUTS_KEY).and_then(object_list))
        .flatten()
        .find_map(|output| matching_id(output, target))
        .ok_or_else(|| anyhow!("no output named '{}' in display report", target))
}

/// The id of `output` if it is named `target` and carries a valid id.
fn matching_id(output: &Value, target: &str) -> Option<u32> {
    let name = output.get(NAME_KEY)?.as_str()?;
    if name != target {
        return None;
    }
    let id = output.get(DISPLAY_ID_KEY)?.as_str()?;
    match id.parse::<u32>() {
        Ok(id) => Some(id),
        Err(e) => {
            log::debug!("Ignoring '{}' with bad display id '{}': {}", name, id, e);
            None
        }
    }
}

/// An array whose elements are all JSON objects, or nothing.
fn object_list(value: &Value) -> Option<Vec<&Value>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.is_object().then_some(v))
        .collect()
}
