pub mod descriptor;
pub mod locate;

pub use descriptor::Descriptor;
