mod all;
mod dialog;
mod footer;
mod keyset_list;
mod log;
mod offset_list;
mod page_control;
mod sidebar;
mod tree;

use self::log::log;
use super::*;
use footer::footer;
use sidebar::sidebar;

pub use all::all as render;
