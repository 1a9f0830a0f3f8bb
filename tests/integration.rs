//! Integration tests for the oled-anim public API.

use heapless::Vec;
use oled_anim::{
    draw_slice, AnimResult, Animator, Blend, Controller, ControllerConfig, Error, FrameBuffer,
    OledBuffer, Sequence, Slice, StateDesc, SteadyFrame, Surface, Widget, WidgetConfig,
    WidgetPhase,
};

static PIX: [u8; 16] = [0xAA; 16];
static FRAMES: [Slice<'static>; 8] = [
    Slice::new(&PIX, 1, 1),
    Slice::new(&PIX, 2, 1),
    Slice::new(&PIX, 3, 1),
    Slice::new(&PIX, 4, 1),
    Slice::new(&PIX, 5, 1),
    Slice::new(&PIX, 6, 1),
    Slice::new(&PIX, 7, 1),
    Slice::new(&PIX, 8, 1),
];
static FRAMES4: [Slice<'static>; 4] = [
    Slice::new(&PIX, 1, 1),
    Slice::new(&PIX, 2, 1),
    Slice::new(&PIX, 3, 1),
    Slice::new(&PIX, 4, 1),
];
static SEQ4: Sequence<'static> = Sequence::new(&FRAMES4);

#[test]
fn animator_reaches_far_end_in_n_minus_one_steps() {
    for n in 1..=FRAMES.len() {
        let seq = Sequence::new(&FRAMES[..n]);
        let steps = (n as u32).saturating_sub(1).max(1);

        let mut fwd = Animator::new();
        fwd.start(&seq, true, 0);
        let mut res = AnimResult::Running;
        for i in 1..=steps {
            res = fwd.step(i * 80);
        }
        assert_eq!(res, AnimResult::DoneAtEnd, "n={}", n);
        assert_eq!(fwd.index() as usize, n - 1);

        let mut back = Animator::new();
        back.start(&seq, false, 0);
        for i in 1..=steps {
            res = back.step(i * 80);
        }
        assert_eq!(res, AnimResult::DoneAtStart, "n={}", n);
        assert_eq!(back.index(), 0);
    }
}

#[test]
fn reversal_never_moves_the_cursor() {
    let seq = Sequence::new(&FRAMES);
    // Stay clear of frame 0 so both steps are mid-sequence.
    for k in 2..7u8 {
        let mut a = Animator::new();
        a.start(&seq, true, 0);
        let mut now = 0;
        while a.index() < k {
            now += 80;
            a.step(now);
        }
        a.reverse(now);
        assert_eq!(a.index(), k);
        a.step(now + 80);
        assert_eq!(a.index(), k - 1);

        a.reverse(now + 80);
        a.step(now + 160);
        assert_eq!(a.index(), k);
    }
}

#[test]
fn checked_slices_reject_bad_geometry() {
    assert_eq!(Slice::try_new(&PIX, 0, 8), Err(Error::EmptySlice));
    assert_eq!(
        Slice::try_new(&PIX, 16, 12),
        Err(Error::SliceDataTooShort {
            expected: 32,
            actual: 16
        })
    );

    let ok = Slice::try_new(&PIX, 8, 12).unwrap();
    assert_eq!(ok.pages(), 2);
    assert_eq!(ok.height_px(), 12);
    assert!(ok.is_valid());
}

#[test]
fn partial_height_slice_only_touches_its_rows() {
    static TALL: [u8; 2] = [0xFF, 0xFF];
    let slice = Slice::with_height_px(&TALL, 1, 11);
    let mut fb = FrameBuffer::<1, 3>::new();
    draw_slice(&mut fb, &slice, 0, 2, Blend::Additive);

    for y in 0..24 {
        assert_eq!(fb.pixel(0, y), (2..13).contains(&y), "y={}", y);
    }
}

#[test]
fn widget_exit_enter_trace() {
    static STATES: [StateDesc<'static>; 2] = [StateDesc::new(&SEQ4), StateDesc::new(&SEQ4)];
    static CFG: WidgetConfig<'static> = WidgetConfig::new(&STATES, 0, 0, 8, 8);

    let mut w = Widget::new(&CFG, 0).unwrap();
    let mut fb = OledBuffer::new();
    let mut trace: Vec<u8, 16> = Vec::new();

    w.request(1, 0);
    let mut now = 0;
    while !w.is_idle() {
        now += 80;
        w.render(&mut fb, now);
        trace.push(w.animator().index()).unwrap();
    }

    assert_eq!(trace.as_slice(), &[2, 1, 0, 1, 2, 3]);
    assert_eq!(w.state(), 1);
    assert_eq!(w.phase(), WidgetPhase::Idle);
}

#[test]
fn widgets_share_one_buffer() {
    static STATES: [StateDesc<'static>; 1] = [StateDesc::new(&SEQ4)];
    static LAYER: WidgetConfig<'static> = WidgetConfig::new(&STATES, 0, 0, 16, 8);
    static CAPS: ControllerConfig<'static> = ControllerConfig::toggle(&SEQ4, 32, 8, Blend::Opaque);
    static SPARK: ControllerConfig<'static> =
        ControllerConfig::oneshot(&SEQ4, 64, 16, SteadyFrame::Last, false);

    let mut layer = Widget::new(&LAYER, 0).unwrap();
    let mut caps = Controller::new(&CAPS, 0);
    let mut spark = Controller::new(&SPARK, 0);
    let mut fb = OledBuffer::new();

    caps.set_desired(true, 0);
    for now in (0..=400).step_by(40) {
        fb.clear();
        layer.tick(&mut fb, now);
        caps.render(&mut fb, now);
        spark.render(&mut fb, now);
    }

    // Steady frames: widget last (4 cols), toggle on (4 cols), spark last (4 cols).
    assert_eq!(fb.read_page_byte(3, 0), 0xAA);
    assert_eq!(fb.read_page_byte(4, 0), 0x00);
    assert_eq!(fb.read_page_byte(35, 1), 0xAA);
    assert_eq!(fb.read_page_byte(67, 2), 0xAA);
    assert_eq!(fb.lit_pixels(), 3 * 4 * 4);
}

#[test]
fn oneshot_completion_is_edge_triggered() {
    static CFG: ControllerConfig<'static> =
        ControllerConfig::oneshot(&SEQ4, 0, 0, SteadyFrame::First, true);
    let mut ctl = Controller::new(&CFG, 0);
    let mut fb = FrameBuffer::<8, 1>::new();

    let mut edges: Vec<u32, 4> = Vec::new();
    for now in (0..1_000).step_by(20) {
        if ctl.render(&mut fb, now) {
            edges.push(now).unwrap();
        }
    }
    assert_eq!(edges.as_slice(), &[240]);

    ctl.trigger(1_000);
    let mut done = 0;
    for now in (1_000..2_000).step_by(20) {
        done += ctl.render(&mut fb, now) as u32;
    }
    assert_eq!(done, 1);
}
