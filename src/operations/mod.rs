pub mod centroid;
pub mod outward;

pub use centroid::centroid;
pub use outward::{outward_point, outward_points};
