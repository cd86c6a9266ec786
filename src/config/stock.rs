//! Built-in theme documents.
//!
//! These documents are guaranteed to parse; they double as examples for theme authors.

const HIKARU: &str = r##"{
    "name": "hikaru",
    "boardImage": "https://raw.githubusercontent.com/upsided/Upsided-Sabaki-Themes/main/hikaru/board.svg",
    "boardColor": "#dcc083",
    "boardInkColor": "rgb(76, 47, 0, 0.8)", "boardColor": "#d2b473",
    "boardFont": "Helvetica Neue,Helvetica,Arial,Verdana,sans-serif",
    "whiteStones": [
        "https://raw.githubusercontent.com/upsided/Upsided-OGS-Themes/main/ogs-hikaru/hikaru_white_stone_raw.svg"
    ],
    "blackStones": [
        "https://raw.githubusercontent.com/upsided/Upsided-OGS-Themes/main/ogs-hikaru/hikaru_black_stone_raw.svg"
    ],
    "shadows": [
        "https://raw.githubusercontent.com/upsided/Upsided-OGS-Themes/main/ogs-hikaru/hikaru_stone_shadow.svg"
    ],
    "shadowOffsets": [[0.02, 0.1]],
    "shadowSizes": [1.1],
    "stoneBoundingBox": [0,0,1,1]
}"##;

const BADUK_BROADCAST: &str = r##"{
    "name": "BadukBroadcast",
    "boardImage": "https://dl.dropboxusercontent.com/s/nbhkek3wbf804d3/baduktv_board.png?dl=1",
    "boardColor": "#cea67b",
    "boardInkColor": "#634222",
    "boardFont": "Tahoma,Verdana,sans-serif",
    "whiteStones": [
        "https://dl.dropboxusercontent.com/s/tcxdcd7cgtqqwkv/baduktv_white_1.png?dl=1",
        "https://dl.dropboxusercontent.com/s/6q2c2a8u8xgdnt6/baduktv_white_2.png?dl=1",
        "https://dl.dropboxusercontent.com/s/r6vqyjp0vhshzkb/baduktv_white_3.png?dl=1"
    ],
    "blackStones": [
        "https://dl.dropboxusercontent.com/s/a0r1gjvoz205fl4/baduktv_black_1.png?dl=1",
        "https://dl.dropboxusercontent.com/s/0db1iscd0qtpx4u/baduktv_black_2.png?dl=1",
        "https://dl.dropboxusercontent.com/s/7lweyxyzoi62s1u/baduktv_black_3.png?dl=1"
    ],
    "shadows": [
        "https://dl.dropboxusercontent.com/s/w85dqpuox1fw4v1/baduktv_shadow.png?dl=1"
    ],
    "sizes": [0.95],
    "blackStoneSizes": [1.08],
    "whiteShadowSizes": [2.2],
    "blackShadowSizes": [2.28],
    "offsets": [[0.005, 0.001], [0.002, -0.008], [-0.008, 0.0]]
}"##;

const KIBITZ: &str = r##"{
    "name": "kibitz",
    "boardColor": "#e4bb66",
    "boardInkColor": "#70601c",
    "boardFont": "Trebuchet,Helvetica,Arial,Verdana,sans-serif",
    "whiteStoneColor": "#f2f2f2",
    "whiteStoneLineWidth": 0,
    "blackStoneColor": "#333333",
    "blackTextColor": "#ebebeb",
    "whiteTextColor": "#484848",
    "sizes": [1.0],
    "stoneBoundingBox": [0,0,1,1]
}"##;

const HAPPY_STONES: &str = r##"{
    "name": "Happy Stones",
    "boardImage": "https://raw.githubusercontent.com/upsided/Upsided-Sabaki-Themes/main/happy-stones/goban_texture_fancy_orange.png",
    "whiteStones": [
        "https://raw.githubusercontent.com/upsided/Upsided-Sabaki-Themes/main/happy-stones/glass_white.png"
    ],
    "blackStones": [
        "https://raw.githubusercontent.com/upsided/Upsided-Sabaki-Themes/main/happy-stones/glass_black.png"
    ],
    "sizes": [2],
    "offsets": [[0.41,0.41]],
    "stoneBoundingBox": [-1.5,-1.5, 2.5, 2.5]
}"##;

/// All built-in theme documents, default first.
pub fn stock_themes() -> [&'static str; 4] {
    [HIKARU, BADUK_BROADCAST, KIBITZ, HAPPY_STONES]
}

/// Document loaded by a freshly constructed engine.
pub fn default_theme_json() -> &'static str {
    HIKARU
}

#[cfg(test)]
#[path = "../../tests/unit/config/stock.rs"]
mod tests;
