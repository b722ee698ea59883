//! Numeric constants shared by the simulator and validation checks.

/// Constants used across the crate
pub mod stabq_constants {
    /// Squared amplitudes below this are treated as zero.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
    /// Seed used by `Simulator::new()` so runs are reproducible by default.
    pub const DEFAULT_SIMULATOR_SEED: u64 = 0x5EED_0F_C0DE;
    /// Dense simulation stops here; `2^24` amplitudes is 256 MiB.
    pub const MAX_SIMULATED_QUBITS: usize = 24;
    /// Widest classical register whose value fits in a `u64`.
    pub const MAX_REGISTER_WIDTH: usize = 64;
}
