// 麻雀(2人聴牌識破)のデータモデル
mod action;
mod define;
mod event;
mod player;
mod rule;
mod stage;
mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use action::*;
pub use define::*;
pub use event::*;
pub use player::*;
pub use rule::*;
pub use stage::*;
pub use tile::*;
