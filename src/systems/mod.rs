//! Systems - bodies and the rules that act on them
//!
//! - particle/   - point masses
//! - rigid_body/ - oriented bodies with angular state
//! - forces/     - force generators and their registry
//! - boundary/   - world-edge policies
//! - contact/    - threshold triggers and listeners

pub mod boundary;
pub mod contact;
pub mod forces;
pub mod particle;
pub mod rigid_body;
