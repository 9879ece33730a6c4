use crate::hand::{Hand, LandmarkIndex};

/// 1ティック分の幾何特徴量
///
/// すべて正規化画像座標上の2D距離。状態を持たず、毎ティック計算し直す。
#[derive(Debug, Clone, Copy)]
pub struct FeatureSet {
    /// 手のサイズ（手首〜中指先の距離、奥行きの代理値）
    pub hand_size: f32,
    /// 非親指4本（人差し指・中指・薬指・小指）の指先伸長距離（手首基準）
    pub extensions: [f32; 4],
    /// 親指先〜人差し指先の距離
    pub pinch_distance: f32,
    /// 指の広がり比率（人差し指先〜小指先の距離 / hand_size）
    pub spread_ratio: f32,
}

impl FeatureSet {
    /// 検出済みの手から特徴量を抽出する
    pub fn extract(hand: &Hand) -> FeatureSet {
        let wrist = hand.get(LandmarkIndex::Wrist);
        let thumb_tip = hand.get(LandmarkIndex::ThumbTip);
        let index_tip = hand.get(LandmarkIndex::IndexTip);
        let middle_tip = hand.get(LandmarkIndex::MiddleTip);
        let pinky_tip = hand.get(LandmarkIndex::PinkyTip);

        let hand_size = middle_tip.distance_2d(wrist);

        let mut extensions = [0.0f32; 4];
        for (i, tip) in LandmarkIndex::FINGERTIPS.iter().enumerate() {
            extensions[i] = hand.wrist_distance(*tip);
        }

        let pinch_distance = thumb_tip.distance_2d(index_tip);

        let finger_spread = index_tip.distance_2d(pinky_tip);
        let spread_ratio = finger_spread / hand_size;

        FeatureSet {
            hand_size,
            extensions,
            pinch_distance,
            spread_ratio,
        }
    }

    /// 人差し指の伸長距離
    pub fn index_extension(&self) -> f32 {
        self.extensions[0]
    }
}
