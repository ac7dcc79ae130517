//! Accelerator memory reporting for the health endpoint.

use std::process::Command;

use tracing::debug;

/// MiB of GPU memory held by this process, or `None` when no NVIDIA driver
/// tooling is available.
pub fn memory_usage() -> Option<f64> {
    let output = Command::new("nvidia-smi")
        .arg("--query-compute-apps=pid,used_memory")
        .arg("--format=csv,noheader,nounits")
        .output()
        .map_err(|e| debug!("nvidia-smi unavailable: {}", e))
        .ok()?;

    if !output.status.success() {
        debug!("nvidia-smi exited with {}", output.status);
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(process_usage(&stdout, std::process::id()))
}

/// Sums `used_memory` of the rows belonging to `pid` in
/// `pid, used_memory` CSV output.
fn process_usage(csv: &str, pid: u32) -> f64 {
    csv.lines()
        .filter_map(|line| {
            let mut parts = line.split(',').map(str::trim);
            let row_pid = parts.next()?.parse::<u32>().ok()?;
            let used = parts.next()?.parse::<f64>().ok()?;
            (row_pid == pid).then_some(used)
        })
        .sum()
}

pub fn format_usage(usage: Option<f64>) -> String {
    match usage {
        Some(mb) => format!("{mb:.2} MB"),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_rows_for_own_pid() {
        let csv = "1200, 512\n42, 1024\n42, 256\nnot-a-row\n";
        assert_eq!(process_usage(csv, 42), 1280.0);
        assert_eq!(process_usage(csv, 7), 0.0);
        assert_eq!(process_usage("", 42), 0.0);
    }

    #[test]
    fn formats_like_megabytes() {
        assert_eq!(format_usage(Some(1280.0)), "1280.00 MB");
        assert_eq!(format_usage(None), "N/A");
    }
}
