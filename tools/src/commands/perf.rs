//! Resource usage of end-to-end runs
//!
//! Runs the `test` command as a child process once per browser mode, samples
//! the machine every second while it runs and writes one `;`-separated CSV
//! per run to the performance log directory.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use sysinfo::Pid;
use tokio::process::Command;

use crate::report;
use crate::resources::{os_label, ResourceSampler, Sample};

const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BrowserMode {
    Headless,
    Headed,
}

impl BrowserMode {
    fn tag(self) -> &'static str {
        match self {
            Self::Headless => "headless",
            Self::Headed => "noheadless",
        }
    }
}

/// Options for the perf command
pub struct PerfOptions {
    pub url: String,
    pub modes: Vec<BrowserMode>,
    pub cases: Vec<u32>,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub cpu_usage_before: f32,
    pub memory_usage_before: f32,
    pub duration: Duration,
    pub cpu_percentages: Vec<f32>,
    pub context_switches: Vec<u64>,
    pub interrupts: Vec<u64>,
    pub memory_percentages: Vec<f32>,
    pub rss_bytes: Vec<u64>,
    pub disk_read_bytes: u64,
    pub disk_write_bytes: u64,
    pub suite_passed: bool,
}

impl RunStats {
    fn record(&mut self, sample: Sample) {
        self.cpu_percentages.push(sample.cpu_percent);
        self.memory_percentages.push(sample.memory_percent);
        self.rss_bytes.push(sample.tree_rss_bytes);
        self.context_switches.extend(sample.context_switches);
        self.interrupts.extend(sample.interrupts);
    }

    /// One row per metric; series rows carry one value per sample.
    pub fn csv_rows(&self) -> Vec<Vec<String>> {
        fn row<T>(name: &str, values: impl IntoIterator<Item = T>, fmt: fn(T) -> String) -> Vec<String> {
            std::iter::once(name.to_owned())
                .chain(values.into_iter().map(fmt))
                .collect()
        }
        let percent = |value: f32| format!("{:.1}", value);
        let count = |value: u64| value.to_string();

        vec![
            row("cpu_usage_before", [self.cpu_usage_before], percent),
            row("memory_usage_before", [self.memory_usage_before], percent),
            row("duration_time", [self.duration.as_secs_f32()], percent),
            row("cpu_percentages", self.cpu_percentages.iter().copied(), percent),
            row("cpu_context_switches", self.context_switches.iter().copied(), count),
            row("cpu_interrupts", self.interrupts.iter().copied(), count),
            row("memory_percentages", self.memory_percentages.iter().copied(), percent),
            row("memory_resident_set_size_bytes", self.rss_bytes.iter().copied(), count),
            row("disk_io_read_bytes", [self.disk_read_bytes], count),
            row("disk_io_write_bytes", [self.disk_write_bytes], count),
            row("suite_passed", [self.suite_passed], |passed: bool| passed.to_string()),
        ]
    }

    fn print(&self) {
        fn percents(values: &[f32]) -> String {
            values
                .iter()
                .map(|value| format!("{:.1}%", value))
                .collect::<Vec<_>>()
                .join(", ")
        }
        fn counts(values: &[u64], unit: &str) -> String {
            values
                .iter()
                .map(|value| format!("{}{}", value, unit))
                .collect::<Vec<_>>()
                .join(", ")
        }

        println!("CPU usage before running test: {:.1}%", self.cpu_usage_before);
        println!("Memory usage before running test: {:.1}%", self.memory_usage_before);
        println!("Duration time: {:.1} seconds", self.duration.as_secs_f32());
        println!("CPU usage (every second): {}", percents(&self.cpu_percentages));
        println!("CPU context switches per second: {}", counts(&self.context_switches, ""));
        println!("CPU interrupts per second: {}", counts(&self.interrupts, ""));
        println!("Memory usage (every second): {}", percents(&self.memory_percentages));
        println!("Resident set size (every second): {}", counts(&self.rss_bytes, " bytes"));
        println!("Disk read: {} bytes", self.disk_read_bytes);
        println!("Disk write: {} bytes", self.disk_write_bytes);
        println!("Suite {}", if self.suite_passed { "passed" } else { "failed" });
    }
}

/// `e2e_<mode>_<os>-<release>_<timestamp>.csv`
pub fn csv_file_name(mode: BrowserMode, os: &str, timestamp: &str) -> String {
    let os: String = os
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' { '-' } else { c })
        .collect();
    format!("e2e_{}_{}_{}.csv", mode.tag(), os, timestamp)
}

pub fn write_csv(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn run(opts: PerfOptions) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(async {
        fs::create_dir_all(&opts.out_dir).with_context(|| {
            format!("Failed to create {}", opts.out_dir.display())
        })?;
        let exe = std::env::current_exe().context("Cannot locate the tools binary")?;

        for &mode in &opts.modes {
            println!("{}", "-".repeat(60));
            println!("Running end-to-end suite {} headless mode", match mode {
                BrowserMode::Headless => "with",
                BrowserMode::Headed => "without",
            });
            println!("Operating System: {}", os_label(" "));
            println!("Start time: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

            let timestamp = report::file_timestamp();
            let stats = measure_run(&exe, &opts, mode).await?;
            stats.print();

            let path = opts
                .out_dir
                .join(csv_file_name(mode, &os_label("-"), &timestamp));
            write_csv(&path, &stats.csv_rows())?;
            println!("Written: {}", path.display());
        }
        Ok(())
    })
}

async fn measure_run(exe: &Path, opts: &PerfOptions, mode: BrowserMode) -> Result<RunStats> {
    let mut command = Command::new(exe);
    command.arg("--url").arg(&opts.url).arg("test");
    if mode == BrowserMode::Headed {
        command.arg("--headed");
    }
    for case in &opts.cases {
        command.arg("--case").arg(case.to_string());
    }
    command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let (cpu_usage_before, memory_usage_before) = ResourceSampler::baseline(SAMPLE_INTERVAL).await;
    let mut stats = RunStats {
        cpu_usage_before,
        memory_usage_before,
        ..RunStats::default()
    };

    let started = Instant::now();
    let mut child = command.spawn().context("Failed to start the test suite")?;
    let pid = child
        .id()
        .context("Test suite exited before it could be sampled")?;
    let mut sampler = ResourceSampler::new(Pid::from_u32(pid));

    let status = loop {
        tokio::select! {
            status = child.wait() => break status.context("Failed to wait for the test suite")?,
            _ = tokio::time::sleep(SAMPLE_INTERVAL) => stats.record(sampler.sample()),
        }
    };

    stats.duration = started.elapsed();
    (stats.disk_read_bytes, stats.disk_write_bytes) = sampler.disk_totals();
    stats.suite_passed = status.success();
    log::info!("Suite finished with {} after {:?}", status, stats.duration);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> RunStats {
        RunStats {
            cpu_usage_before: 3.14,
            memory_usage_before: 41.0,
            duration: Duration::from_millis(12_340),
            cpu_percentages: vec![12.5, 30.0],
            context_switches: vec![1500, 1720],
            interrupts: vec![900, 950],
            memory_percentages: vec![42.0, 43.25],
            rss_bytes: vec![1_048_576, 2_097_152],
            disk_read_bytes: 4096,
            disk_write_bytes: 8192,
            suite_passed: true,
        }
    }

    #[test]
    fn rows_follow_metric_order() {
        let rows = stats().csv_rows();
        let names: Vec<_> = rows.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(names, [
            "cpu_usage_before",
            "memory_usage_before",
            "duration_time",
            "cpu_percentages",
            "cpu_context_switches",
            "cpu_interrupts",
            "memory_percentages",
            "memory_resident_set_size_bytes",
            "disk_io_read_bytes",
            "disk_io_write_bytes",
            "suite_passed",
        ]);
        assert_eq!(rows[0], ["cpu_usage_before", "3.1"]);
        assert_eq!(rows[2], ["duration_time", "12.3"]);
        assert_eq!(rows[6], ["memory_percentages", "42.0", "43.2"]);
        assert_eq!(rows[7], ["memory_resident_set_size_bytes", "1048576", "2097152"]);
    }

    #[test]
    fn missing_kernel_counters_leave_rows_bare() {
        let mut stats = RunStats::default();
        stats.record(Sample {
            cpu_percent: 5.0,
            memory_percent: 20.0,
            tree_rss_bytes: 100,
            context_switches: None,
            interrupts: None,
        });
        let rows = stats.csv_rows();
        assert_eq!(rows[3], ["cpu_percentages", "5.0"]);
        assert_eq!(rows[4], ["cpu_context_switches"]);
        assert_eq!(rows[5], ["cpu_interrupts"]);
    }

    #[test]
    fn csv_is_semicolon_separated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        write_csv(&path, &stats().csv_rows()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[3], "cpu_percentages;12.5;30.0");
        assert_eq!(lines[10], "suite_passed;true");
    }

    #[test]
    fn file_name_carries_mode_and_os() {
        assert_eq!(
            csv_file_name(BrowserMode::Headed, "linux-6.8.0 generic", "20240131_142501"),
            "e2e_noheadless_linux-6.8.0-generic_20240131_142501.csv"
        );
        assert_eq!(
            csv_file_name(BrowserMode::Headless, "macos-23.1.0", "20240131_142501"),
            "e2e_headless_macos-23.1.0_20240131_142501.csv"
        );
    }
}
