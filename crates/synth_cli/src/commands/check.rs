//! Check command implementation
//!
//! Reports build and runtime information.

use serde::Serialize;

use crate::Result;

/// Build and runtime facts
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    /// Crate version
    pub version: &'static str,
    /// Logical CPUs
    pub logical_cpus: usize,
    /// Physical CPUs
    pub physical_cpus: usize,
    /// Workers in the global rayon pool
    pub rayon_threads: usize,
    /// Whether this is a debug build
    pub debug_build: bool,
}

impl SystemInfo {
    /// Collect information about the running process
    pub fn collect() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            logical_cpus: num_cpus::get(),
            physical_cpus: num_cpus::get_physical(),
            rayon_threads: rayon::current_num_threads(),
            debug_build: cfg!(debug_assertions),
        }
    }
}

/// Run the check command
pub fn run() -> Result<()> {
    let info = SystemInfo::collect();
    println!("synth v{}", info.version);
    println!("  Logical CPUs:   {}", info.logical_cpus);
    println!("  Physical CPUs:  {}", info.physical_cpus);
    println!("  Rayon threads:  {}", info.rayon_threads);
    println!(
        "  Build profile:  {}",
        if info.debug_build { "debug" } else { "release" }
    );
    Ok(())
}
