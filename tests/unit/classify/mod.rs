pub mod blending;
