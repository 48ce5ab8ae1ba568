pub mod callout;
pub mod camera;
pub mod element;
pub mod evaluator;
pub mod intro;
pub mod legacy;
pub mod outro;
