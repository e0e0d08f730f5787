mod mapper;
mod normalization;

pub use mapper::DistanceColorMapper;
pub use normalization::{Normalization, NormalizationWindow};
