use std::time::{Duration, Instant};

use crate::config::ControlConfig;
use crate::gesture::{FeatureSet, Gesture};
use crate::hand::{Hand, LandmarkIndex};

/// 1ティックで発火する出力イベント
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// 回転操作（Open時のみ）。座標はミラー済み
    HandMove { x: f32, y: f32 },
    /// カーソル操作（Point/Pinch時）。座標はミラー済み
    CursorMove { x: f32, y: f32 },
    /// ズーム倍率（Zoom時のみ）。ズーム開始時の手のサイズ基準
    Zoom { factor: f32 },
    /// クリック（Pinch突入エッジ、デバウンス済み）
    Click,
    /// 現在のジェスチャー。手が映っているティックでは必ず最後に発火する
    Gesture(Gesture),
}

/// ジェスチャーと生ランドマークを連続出力信号に変換する
///
/// EMA アンカー・ズーム基準値・クリックデバウンスの状態をティック間で保持する。
/// 手が消えたティックとセッション再開時には reset で初期状態に戻す。
pub struct ControlMapper {
    config: ControlConfig,
    rotation_anchor: (f32, f32),
    cursor_anchor: (f32, f32),
    zoom_baseline: Option<f32>,
    pinch_active: bool,
    last_click: Option<Instant>,
}

impl ControlMapper {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            rotation_anchor: (0.0, 0.0),
            cursor_anchor: (0.5, 0.5),
            zoom_baseline: None,
            pinch_active: false,
            last_click: None,
        }
    }

    /// 全スムージング状態を初期値に戻す
    pub fn reset(&mut self) {
        self.rotation_anchor = (0.0, 0.0);
        self.cursor_anchor = (0.5, 0.5);
        self.zoom_baseline = None;
        self.pinch_active = false;
        self.last_click = None;
    }

    /// 1ティック分の出力イベントを生成する
    ///
    /// イベント順序は カーソル → ジェスチャー固有 → Gesture で固定。
    pub fn update(
        &mut self,
        hand: &Hand,
        gesture: Gesture,
        features: &FeatureSet,
        now: Instant,
    ) -> Vec<ControlEvent> {
        let mut events = Vec::new();

        // カーソル座標はジェスチャー分岐より先に更新する
        if gesture == Gesture::Point || gesture == Gesture::Pinch {
            events.push(self.update_cursor(hand, gesture));
        }

        match gesture {
            Gesture::Fist => {
                self.zoom_baseline = None;
                self.pinch_active = false;
            }
            Gesture::Pinch => {
                self.zoom_baseline = None;
                // Pinch突入エッジでのみクリック判定する
                if !self.pinch_active {
                    self.pinch_active = true;
                    if self.click_allowed(now) {
                        self.last_click = Some(now);
                        events.push(ControlEvent::Click);
                    }
                }
            }
            Gesture::Point => {
                self.zoom_baseline = None;
                self.pinch_active = false;
            }
            Gesture::Zoom => {
                self.pinch_active = false;
                let baseline = *self.zoom_baseline.get_or_insert(features.hand_size);
                events.push(ControlEvent::Zoom {
                    factor: features.hand_size / baseline,
                });
            }
            Gesture::Open => {
                self.zoom_baseline = None;
                self.pinch_active = false;
                events.push(self.update_rotation(hand));
            }
        }

        events.push(ControlEvent::Gesture(gesture));
        events
    }

    /// 回転アンカー: ランドマーク9（中指の付け根）をEMAで平滑化してからミラー
    fn update_rotation(&mut self, hand: &Hand) -> ControlEvent {
        let anchor = hand.get(LandmarkIndex::MiddleMcp);
        let f = self.config.rotation_smoothing;
        let sx = self.rotation_anchor.0 + (anchor.x - self.rotation_anchor.0) * f;
        let sy = self.rotation_anchor.1 + (anchor.y - self.rotation_anchor.1) * f;
        self.rotation_anchor = (sx, sy);
        ControlEvent::HandMove { x: 1.0 - sx, y: sy }
    }

    /// カーソルアンカー: 生座標をミラーしてからEMAで平滑化
    ///
    /// Pointは人差し指先、Pinchは親指先と人差し指先の中点を使う。
    fn update_cursor(&mut self, hand: &Hand, gesture: Gesture) -> ControlEvent {
        let (raw_x, raw_y) = if gesture == Gesture::Pinch {
            let thumb = hand.get(LandmarkIndex::ThumbTip);
            let index = hand.get(LandmarkIndex::IndexTip);
            (1.0 - (thumb.x + index.x) / 2.0, (thumb.y + index.y) / 2.0)
        } else {
            let index = hand.get(LandmarkIndex::IndexTip);
            (1.0 - index.x, index.y)
        };

        let f = self.config.cursor_smoothing;
        let sx = self.cursor_anchor.0 + (raw_x - self.cursor_anchor.0) * f;
        let sy = self.cursor_anchor.1 + (raw_y - self.cursor_anchor.1) * f;
        self.cursor_anchor = (sx, sy);
        ControlEvent::CursorMove { x: sx, y: sy }
    }

    fn click_allowed(&self, now: Instant) -> bool {
        match self.last_click {
            None => true,
            Some(last) => {
                now.duration_since(last) > Duration::from_millis(self.config.click_debounce_ms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Point3;

    fn make_hand(points: &[(LandmarkIndex, f32, f32)]) -> Hand {
        let mut landmarks = [Point3::default(); LandmarkIndex::COUNT];
        for (index, x, y) in points {
            landmarks[*index as usize] = Point3::new(*x, *y, 0.0);
        }
        Hand::new(landmarks)
    }

    fn features(hand_size: f32) -> FeatureSet {
        FeatureSet {
            hand_size,
            extensions: [0.0; 4],
            pinch_distance: 0.0,
            spread_ratio: 0.0,
        }
    }

    fn mapper() -> ControlMapper {
        ControlMapper::new(ControlConfig::default())
    }

    #[test]
    fn test_open_emits_hand_move_and_gesture() {
        let mut m = mapper();
        let hand = make_hand(&[(LandmarkIndex::MiddleMcp, 0.5, 0.5)]);
        let events = m.update(&hand, Gesture::Open, &features(0.4), Instant::now());
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ControlEvent::HandMove { .. }));
        assert_eq!(events[1], ControlEvent::Gesture(Gesture::Open));
    }

    #[test]
    fn test_rotation_anchor_converges() {
        let mut m = mapper();
        let hand = make_hand(&[(LandmarkIndex::MiddleMcp, 0.8, 0.3)]);
        let now = Instant::now();
        let mut last = (0.0, 0.0);
        for _ in 0..30 {
            let events = m.update(&hand, Gesture::Open, &features(0.4), now);
            if let ControlEvent::HandMove { x, y } = events[0] {
                last = (x, y);
            }
        }
        // 30ティック後には生座標(ミラー済み 0.2, 0.3)の1%以内に収束する
        assert!((last.0 - 0.2).abs() < 0.01);
        assert!((last.1 - 0.3).abs() < 0.01);
    }

    #[test]
    fn test_cursor_smoothing_moves_toward_raw() {
        let mut m = mapper();
        let hand = make_hand(&[(LandmarkIndex::IndexTip, 0.0, 1.0)]);
        let events = m.update(&hand, Gesture::Point, &features(0.4), Instant::now());
        // 生座標はミラーで (1.0, 1.0)、初期アンカー(0.5, 0.5)から0.4倍進む
        assert_eq!(
            events[0],
            ControlEvent::CursorMove { x: 0.7, y: 0.7 }
        );
    }

    #[test]
    fn test_pinch_cursor_uses_fingertip_midpoint() {
        let mut m = mapper();
        let hand = make_hand(&[
            (LandmarkIndex::ThumbTip, 0.4, 0.6),
            (LandmarkIndex::IndexTip, 0.6, 0.8),
        ]);
        let events = m.update(&hand, Gesture::Pinch, &features(0.4), Instant::now());
        // 中点(0.5, 0.7)をミラーして(0.5, 0.7)、EMAで(0.5, 0.58)
        match events[0] {
            ControlEvent::CursorMove { x, y } => {
                assert!((x - 0.5).abs() < 1e-6);
                assert!((y - 0.58).abs() < 1e-6);
            }
            other => panic!("expected CursorMove, got {:?}", other),
        }
    }

    #[test]
    fn test_click_fires_once_per_pinch_entry() {
        let mut m = mapper();
        let hand = make_hand(&[
            (LandmarkIndex::ThumbTip, 0.5, 0.5),
            (LandmarkIndex::IndexTip, 0.5, 0.5),
        ]);
        let now = Instant::now();
        let first = m.update(&hand, Gesture::Pinch, &features(0.4), now);
        assert!(first.contains(&ControlEvent::Click));
        // Pinch継続中は再発火しない
        let second = m.update(&hand, Gesture::Pinch, &features(0.4), now);
        assert!(!second.contains(&ControlEvent::Click));
    }

    #[test]
    fn test_click_debounced_within_window() {
        let mut m = mapper();
        let hand = make_hand(&[
            (LandmarkIndex::ThumbTip, 0.5, 0.5),
            (LandmarkIndex::IndexTip, 0.5, 0.5),
        ]);
        let t0 = Instant::now();
        let first = m.update(&hand, Gesture::Pinch, &features(0.4), t0);
        assert!(first.contains(&ControlEvent::Click));

        // 一度Pinchを抜けてすぐ再突入。300ms未満なのでクリックなし
        m.update(&hand, Gesture::Open, &features(0.4), t0 + Duration::from_millis(50));
        let again = m.update(&hand, Gesture::Pinch, &features(0.4), t0 + Duration::from_millis(100));
        assert!(!again.contains(&ControlEvent::Click));

        // 300ms経過後の再突入では発火する
        m.update(&hand, Gesture::Open, &features(0.4), t0 + Duration::from_millis(350));
        let later = m.update(&hand, Gesture::Pinch, &features(0.4), t0 + Duration::from_millis(400));
        assert!(later.contains(&ControlEvent::Click));
    }

    #[test]
    fn test_zoom_factor_is_one_at_constant_size() {
        let mut m = mapper();
        let hand = make_hand(&[]);
        let now = Instant::now();
        for _ in 0..5 {
            let events = m.update(&hand, Gesture::Zoom, &features(0.4), now);
            assert!(events.contains(&ControlEvent::Zoom { factor: 1.0 }));
        }
    }

    #[test]
    fn test_zoom_factor_tracks_hand_size() {
        let mut m = mapper();
        let hand = make_hand(&[]);
        let now = Instant::now();
        m.update(&hand, Gesture::Zoom, &features(0.2), now);
        let events = m.update(&hand, Gesture::Zoom, &features(0.3), now);
        match events[0] {
            ControlEvent::Zoom { factor } => assert!((factor - 1.5).abs() < 1e-6),
            other => panic!("expected Zoom, got {:?}", other),
        }
    }

    #[test]
    fn test_zoom_rebases_after_interruption() {
        let mut m = mapper();
        let hand = make_hand(&[]);
        let now = Instant::now();
        m.update(&hand, Gesture::Zoom, &features(0.2), now);
        // Zoom以外のジェスチャーで基準値がクリアされる
        m.update(&hand, Gesture::Fist, &features(0.2), now);
        let events = m.update(&hand, Gesture::Zoom, &features(0.4), now);
        assert!(events.contains(&ControlEvent::Zoom { factor: 1.0 }));
    }

    #[test]
    fn test_zoom_rebases_after_reset() {
        let mut m = mapper();
        let hand = make_hand(&[]);
        let now = Instant::now();
        m.update(&hand, Gesture::Zoom, &features(0.2), now);
        // 手が消えたティックに相当
        m.reset();
        let events = m.update(&hand, Gesture::Zoom, &features(0.4), now);
        assert!(events.contains(&ControlEvent::Zoom { factor: 1.0 }));
    }

    #[test]
    fn test_fist_clears_pinch_edge() {
        let mut m = mapper();
        let hand = make_hand(&[
            (LandmarkIndex::ThumbTip, 0.5, 0.5),
            (LandmarkIndex::IndexTip, 0.5, 0.5),
        ]);
        let t0 = Instant::now();
        m.update(&hand, Gesture::Pinch, &features(0.4), t0);
        // Fist経由でもエッジ状態は解除され、次のPinch突入で再トリガーできる
        m.update(&hand, Gesture::Fist, &features(0.4), t0 + Duration::from_millis(400));
        let events = m.update(&hand, Gesture::Pinch, &features(0.4), t0 + Duration::from_millis(800));
        assert!(events.contains(&ControlEvent::Click));
    }

    #[test]
    fn test_gesture_event_is_always_last() {
        let mut m = mapper();
        let hand = make_hand(&[
            (LandmarkIndex::ThumbTip, 0.5, 0.5),
            (LandmarkIndex::IndexTip, 0.5, 0.5),
        ]);
        for gesture in [
            Gesture::Open,
            Gesture::Fist,
            Gesture::Pinch,
            Gesture::Point,
            Gesture::Zoom,
        ] {
            let events = m.update(&hand, gesture, &features(0.4), Instant::now());
            assert_eq!(*events.last().unwrap(), ControlEvent::Gesture(gesture));
        }
    }

    #[test]
    fn test_reset_restores_initial_anchors() {
        let mut m = mapper();
        let hand = make_hand(&[(LandmarkIndex::IndexTip, 0.1, 0.9)]);
        let now = Instant::now();
        m.update(&hand, Gesture::Point, &features(0.4), now);
        m.reset();
        let events = m.update(&hand, Gesture::Point, &features(0.4), now);
        // アンカーが(0.5, 0.5)に戻っているので1ティック目の出力は初期値基準
        assert_eq!(
            events[0],
            ControlEvent::CursorMove { x: 0.66, y: 0.66 }
        );
    }
}
