mod color_by_distance;

pub use color_by_distance::{
    ColorByDistance, ColoringReport, WindowFraction, DEFAULT_WINDOWS, ORANGE, PURPLE,
};
