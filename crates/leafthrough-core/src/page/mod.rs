mod element;
pub mod markup;
mod route;

pub use element::{Element, ElementId, ElementKind, Page, Selector};
pub use route::{resolve, Route, ViewKind};
