//! Distance-only routing over a graph of named locations.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`graph`]    | `LocationGraph`, edge insertion, name-collision report     |
//! | [`dijkstra`] | `shortest_distances`, `Distances`, `Distance`              |
//! | [`nearest`]  | nearest pump station / substation queries                  |
//! | [`loader`]   | CSV edge and facility lists                                |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                             |

pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod loader;
pub mod nearest;

pub use dijkstra::{Distance, Distances};
pub use error::{RouteError, RouteResult};
pub use graph::{LocationGraph, Weight};
pub use loader::{load_edges, load_facilities, read_edges, read_facilities, LoadOptions};
pub use nearest::Nearest;
