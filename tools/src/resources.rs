//! System and process-tree resource sampling for the `perf` command
//!
//! CPU and memory come from `sysinfo`. Context switches and interrupts are
//! kernel-wide counters that `sysinfo` does not expose; on Linux they are read
//! from `/proc/stat`, elsewhere those series stay empty.

use std::collections::{HashMap, HashSet};
use std::time::Duration;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Kernel-wide counters since boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuCounters {
    pub context_switches: u64,
    pub interrupts: u64,
}

/// Reads the `ctxt` and `intr` lines of a `/proc/stat` dump.
pub fn parse_proc_stat(text: &str) -> Option<CpuCounters> {
    let mut context_switches = None;
    let mut interrupts = None;
    for line in text.lines() {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("ctxt") => context_switches = fields.next().and_then(|v| v.parse().ok()),
            // The first number after `intr` is the total
            Some("intr") => interrupts = fields.next().and_then(|v| v.parse().ok()),
            _ => {}
        }
    }
    Some(CpuCounters {
        context_switches: context_switches?,
        interrupts: interrupts?,
    })
}

fn read_cpu_counters() -> Option<CpuCounters> {
    let text = std::fs::read_to_string("/proc/stat").ok()?;
    parse_proc_stat(&text)
}

/// `root` and every process descending from it.
pub fn process_tree(
    root: Pid,
    parents: impl IntoIterator<Item = (Pid, Option<Pid>)>,
) -> HashSet<Pid> {
    let parents: Vec<_> = parents.into_iter().collect();
    let mut members = HashSet::from([root]);
    loop {
        let before = members.len();
        for (pid, parent) in &parents {
            if parent.is_some_and(|parent| members.contains(&parent)) {
                members.insert(*pid);
            }
        }
        if members.len() == before {
            return members;
        }
    }
}

/// One reading taken while the suite runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    /// Resident memory of the suite and the browser it started
    pub tree_rss_bytes: u64,
    /// Counter deltas since the previous sample
    pub context_switches: Option<u64>,
    pub interrupts: Option<u64>,
}

pub struct ResourceSampler {
    system: System,
    root: Pid,
    counters: Option<CpuCounters>,
    /// Largest lifetime disk totals seen per process (read, written)
    disk: HashMap<Pid, (u64, u64)>,
}

impl ResourceSampler {
    pub fn new(root: Pid) -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        Self {
            system,
            root,
            counters: read_cpu_counters(),
            disk: HashMap::new(),
        }
    }

    /// CPU and memory usage before anything is started, measured over `window`.
    pub async fn baseline(window: Duration) -> (f32, f32) {
        let mut system = System::new();
        system.refresh_cpu_usage();
        tokio::time::sleep(window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)).await;
        system.refresh_cpu_usage();
        system.refresh_memory();
        (system.global_cpu_usage(), memory_percent(&system))
    }

    /// Call at most once per `MINIMUM_CPU_UPDATE_INTERVAL`.
    pub fn sample(&mut self) -> Sample {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_disk_usage(),
        );

        let tree = process_tree(
            self.root,
            self.system
                .processes()
                .iter()
                .map(|(pid, process)| (*pid, process.parent())),
        );
        let mut tree_rss_bytes = 0;
        for pid in &tree {
            let Some(process) = self.system.process(*pid) else {
                continue;
            };
            tree_rss_bytes += process.memory();
            let usage = process.disk_usage();
            let totals = self.disk.entry(*pid).or_default();
            totals.0 = totals.0.max(usage.total_read_bytes);
            totals.1 = totals.1.max(usage.total_written_bytes);
        }

        let now = read_cpu_counters();
        let delta = match (self.counters, now) {
            (Some(before), Some(after)) => Some((
                after.context_switches.saturating_sub(before.context_switches),
                after.interrupts.saturating_sub(before.interrupts),
            )),
            _ => None,
        };
        self.counters = now;

        Sample {
            cpu_percent: self.system.global_cpu_usage(),
            memory_percent: memory_percent(&self.system),
            tree_rss_bytes,
            context_switches: delta.map(|(switches, _)| switches),
            interrupts: delta.map(|(_, interrupts)| interrupts),
        }
    }

    /// Bytes read and written by every process the tree ever contained
    pub fn disk_totals(&self) -> (u64, u64) {
        self.disk
            .values()
            .fold((0, 0), |(read, written), (r, w)| (read + r, written + w))
    }
}

fn memory_percent(system: &System) -> f32 {
    match system.total_memory() {
        0 => 0.0,
        total => (system.used_memory() as f64 / total as f64 * 100.0) as f32,
    }
}

/// e.g. `Linux 6.8.0`, joined with `separator`
pub fn os_label(separator: &str) -> String {
    let name = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
    match System::kernel_version() {
        Some(release) => format!("{}{}{}", name, separator, release),
        None => name,
    }
}
