//! Demo bitmaps and the sequences built from them.
//!
//! Frames are generated by `const fn`s so they still end up as plain
//! read-only statics.

use oled_anim::{slice_seq, Slice};

/// 16×16 layer icon: `rows` filled from the bottom, `dots` markers on top.
const fn layer_icon(rows: u8, dots: u8) -> [u8; 32] {
    let mut out = [0u8; 32];
    let fill: u16 = if rows == 0 { 0 } else { 0xFFFF << (16 - rows) };
    let mut x = 0;
    while x < 16 {
        let mut col = fill;
        // Frame border
        if x == 0 || x == 15 {
            col |= 0xFFFF;
        }
        col |= 0x8000;
        if (x as u8) < dots * 4 && x % 4 == 1 {
            col |= 0x0003;
        }
        out[x] = col as u8;
        out[16 + x] = (col >> 8) as u8;
        x += 1;
    }
    out
}

/// 12×8 caps-lock pill, `cols` columns lit from the left.
const fn caps_pill(cols: u8) -> [u8; 12] {
    let mut out = [0u8; 12];
    let mut x = 0;
    while x < 12 {
        let mut col = 0x81u8;
        if x == 0 || x == 11 {
            col = 0x7E;
        } else if (x as u8) <= cols {
            col = 0xFF;
        }
        out[x] = col;
        x += 1;
    }
    out
}

/// 8×8 spark, a square of side `2 * size` centred in the cell.
const fn spark(size: u8) -> [u8; 8] {
    let mut out = [0u8; 8];
    let lo = 4 - size;
    let hi = 4 + size;
    let mut col: u8 = 0;
    let mut row = lo;
    while row < hi {
        col |= 1 << row;
        row += 1;
    }
    let mut x = lo;
    while x < hi {
        out[x as usize] = col;
        x += 1;
    }
    out
}

/// 32×8 logo wipe, `cols` columns revealed.
const fn logo(cols: u8) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut x = 0;
    while x < 32 && (x as u8) < cols {
        out[x] = if x % 4 == 3 { 0x00 } else { 0x3C };
        x += 1;
    }
    out
}

macro_rules! layer_frames {
    ($($name:ident = $dots:expr;)+) => {
        $(
            pub mod $name {
                pub static F0: [u8; 32] = super::layer_icon(0, $dots);
                pub static F1: [u8; 32] = super::layer_icon(5, $dots);
                pub static F2: [u8; 32] = super::layer_icon(10, $dots);
                pub static F3: [u8; 32] = super::layer_icon(15, $dots);
            }
        )+
    };
}

layer_frames! {
    base = 1;
    lower = 2;
    raise = 3;
    adjust = 4;
}

slice_seq!(
    pub LAYER_BASE,
    Slice::new(&base::F0, 16, 2),
    Slice::new(&base::F1, 16, 2),
    Slice::new(&base::F2, 16, 2),
    Slice::new(&base::F3, 16, 2),
);

slice_seq!(
    pub LAYER_LOWER,
    Slice::new(&lower::F0, 16, 2),
    Slice::new(&lower::F1, 16, 2),
    Slice::new(&lower::F2, 16, 2),
    Slice::new(&lower::F3, 16, 2),
);

slice_seq!(
    pub LAYER_RAISE,
    Slice::new(&raise::F0, 16, 2),
    Slice::new(&raise::F1, 16, 2),
    Slice::new(&raise::F2, 16, 2),
    Slice::new(&raise::F3, 16, 2),
);

slice_seq!(
    pub LAYER_ADJUST,
    Slice::new(&adjust::F0, 16, 2),
    Slice::new(&adjust::F1, 16, 2),
    Slice::new(&adjust::F2, 16, 2),
    Slice::new(&adjust::F3, 16, 2),
);

static CAPS_0: [u8; 12] = caps_pill(0);
static CAPS_1: [u8; 12] = caps_pill(3);
static CAPS_2: [u8; 12] = caps_pill(6);
static CAPS_3: [u8; 12] = caps_pill(10);

slice_seq!(
    pub CAPS,
    Slice::new(&CAPS_0, 12, 1),
    Slice::new(&CAPS_1, 12, 1),
    Slice::new(&CAPS_2, 12, 1),
    Slice::new(&CAPS_3, 12, 1),
);

static SPARK_0: [u8; 8] = spark(0);
static SPARK_1: [u8; 8] = spark(1);
static SPARK_2: [u8; 8] = spark(2);
static SPARK_3: [u8; 8] = spark(4);

slice_seq!(
    pub SPARK,
    Slice::new(&SPARK_0, 8, 1),
    Slice::new(&SPARK_1, 8, 1),
    Slice::new(&SPARK_2, 8, 1),
    Slice::new(&SPARK_3, 8, 1),
);

static LOGO_0: [u8; 32] = logo(8);
static LOGO_1: [u8; 32] = logo(16);
static LOGO_2: [u8; 32] = logo(24);
static LOGO_3: [u8; 32] = logo(32);

slice_seq!(
    pub LOGO,
    Slice::new(&LOGO_0, 32, 1),
    Slice::new(&LOGO_1, 32, 1),
    Slice::new(&LOGO_2, 32, 1),
    Slice::new(&LOGO_3, 32, 1),
);
