pub use self::{game::*, menu::*, text::*};

mod game;
mod menu;
mod text;
