// 手牌の和了形,聴牌判定を行うモジュール
mod win;

pub use self::win::{
    calc_discards_to_tenpai, is_all_melds, is_chiitoitsu_win, is_normal_win, is_winning_hand,
    waiting_tile_kinds,
};
