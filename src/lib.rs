pub mod consts;
pub mod math;

pub mod tuple;
pub mod color;
pub mod matrix;
pub mod transform;

pub mod ray;
pub mod shape;
pub mod intersect;
pub mod light;

pub mod canvas;
pub mod scene;
pub mod demo;

pub mod error;

pub use math::feq;
pub use error::{ Error, Result };
