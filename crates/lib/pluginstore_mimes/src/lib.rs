mod detect;

pub use detect::detect_mime;

use mime::Mime;
use std::sync::LazyLock;

macro_rules! mime {
    ($id:ident, $mime:expr) => {
        pub static $id: LazyLock<Mime> = LazyLock::new(|| $mime.parse().unwrap());
    };
}

mime!(FONT_WOFF2, "font/woff2");
mime!(FONT_TTF, "font/ttf");
mime!(APPLICATION_VND_MS_FONTOBJECT, "application/vnd.ms-fontobject");
