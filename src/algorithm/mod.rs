/// Frame-driver boundary shared by both engines
pub mod driver;
/// Nearest-color sampling over the target's opaque pixels
pub mod matching;
/// Randomized patch optimizer with strict hill-climbing acceptance
pub mod mutation;
/// Particle and draw-primitive records
pub mod particle;
/// Source-to-target particle layout and eased motion
pub mod transport;
/// Rollback log for rejected patches
pub mod undo;
