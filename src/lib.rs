pub mod game;
pub mod screens;
pub mod session;
pub mod term;

/// A grid cell as (row, column), counted from the top-left corner.
pub type Pos = (i16, i16);
