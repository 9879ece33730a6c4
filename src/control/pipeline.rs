use std::time::Instant;

use crate::config::Config;
use crate::gesture::{FeatureSet, Gesture, GestureClassifier};
use crate::hand::HandFrame;

use super::mapper::{ControlEvent, ControlMapper};

/// 特徴抽出 → 分類 → 出力変換 を1ティック分まとめて実行する
///
/// 手が映っていないティックではスムージング状態をリセットし、イベントを出さない。
pub struct Pipeline {
    classifier: GestureClassifier,
    mapper: ControlMapper,
    last_gesture: Option<Gesture>,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: GestureClassifier::new(config.gesture.clone()),
            mapper: ControlMapper::new(config.control.clone()),
            last_gesture: None,
        }
    }

    /// 1ティック処理。戻り値のイベントは順序どおりに配信すること。
    pub fn process(&mut self, frame: &HandFrame, now: Instant) -> Vec<ControlEvent> {
        match &frame.hand {
            None => {
                self.mapper.reset();
                self.last_gesture = None;
                Vec::new()
            }
            Some(hand) => {
                let features = FeatureSet::extract(hand);
                let gesture = self.classifier.classify(&features);
                self.last_gesture = Some(gesture);
                self.mapper.update(hand, gesture, &features, now)
            }
        }
    }

    /// 直近ティックのジェスチャー（オーバーレイ表示用）
    pub fn last_gesture(&self) -> Option<Gesture> {
        self.last_gesture
    }

    /// セッション開始時に呼ぶ
    pub fn reset(&mut self) {
        self.mapper.reset();
        self.last_gesture = None;
    }
}
