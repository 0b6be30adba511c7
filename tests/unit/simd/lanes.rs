use super::*;

fn lanes_of<V: Lanes>(v: V) -> Vec<f32> {
    let mut out = vec![0.0; V::LANES];
    v.store(&mut out);
    out
}

#[test]
fn load_store_preserves_lane_order() {
    let src: Vec<f32> = (0..10).map(|i| i as f32).collect();
    assert_eq!(lanes_of(<f32x4 as Lanes>::load(&src[2..])), [2.0, 3.0, 4.0, 5.0]);
    assert_eq!(lanes_of(<f32x8 as Lanes>::load(&src)), src[..8]);
}

#[test]
fn round_even_matches_scalar_ties_to_even() {
    let src = [0.5f32, 1.5, 2.5, -0.5, 3.49, 254.5, 255.5, 7.0];
    let got = lanes_of(Lanes::round_even(<f32x8 as Lanes>::load(&src)));
    let want: Vec<f32> = src.iter().map(|v| v.round_ties_even()).collect();
    assert_eq!(got, want);
    assert_eq!(got, [0.0, 2.0, 2.0, 0.0, 3.0, 254.0, 256.0, 7.0]);
}

#[test]
fn select_gt_picks_per_lane() {
    let x = <f32x4 as Lanes>::load(&[0.25, 0.5, 0.75, 1.0]);
    let out = x.select_gt(
        <f32x4 as Lanes>::splat(0.5),
        <f32x4 as Lanes>::splat(1.0),
        <f32x4 as Lanes>::splat(0.0),
    );
    assert_eq!(lanes_of(out), [0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn alpha_splat_broadcasts_per_pixel() {
    let v = <f32x8 as Lanes>::load(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
    assert_eq!(
        lanes_of(Lanes::alpha_splat(v)),
        [0.4, 0.4, 0.4, 0.4, 0.8, 0.8, 0.8, 0.8]
    );
}

#[test]
fn with_alpha_of_replaces_only_alpha_lanes() {
    let color = <f32x8 as Lanes>::load(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    let alpha = <f32x8 as Lanes>::splat(9.0);
    assert_eq!(
        lanes_of(Lanes::with_alpha_of(color, alpha)),
        [1.0, 2.0, 3.0, 9.0, 5.0, 6.0, 7.0, 9.0]
    );
}

#[test]
fn lane_width_prefers_widest_divisor() {
    assert_eq!(LaneWidth::for_lanes(4), Some(LaneWidth::X4));
    assert_eq!(LaneWidth::for_lanes(8), Some(LaneWidth::X8));
    assert_eq!(LaneWidth::for_lanes(16), Some(LaneWidth::X8));
    assert_eq!(LaneWidth::for_lanes(2), None);
    assert_eq!(LaneWidth::for_lanes(0), None);
    assert_eq!(LaneWidth::X8.lanes(), 8);
}
