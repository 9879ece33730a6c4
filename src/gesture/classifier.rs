use crate::config::GestureConfig;

use super::features::FeatureSet;

/// 分類されるジェスチャー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// 開いた手。回転操作
    Open,
    /// 握り拳
    Fist,
    /// 親指と人差し指をつまむ。クリック
    Pinch,
    /// 人差し指だけ伸ばす。カーソル操作
    Point,
    /// 指を閉じたまま手を前後させる。ズーム操作
    Zoom,
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Open => "open",
            Gesture::Fist => "fist",
            Gesture::Pinch => "pinch",
            Gesture::Point => "point",
            Gesture::Zoom => "zoom",
        }
    }
}

/// 特徴量からジェスチャーを決定する分類器
///
/// 判定は固定の優先順位で行う: Fist > Pinch > Point > Zoom > Open。
/// FistとPinchは幾何的に最も限定されたポーズなので、緩いPoint/Zoom判定より
/// 先に評価しないと閉じかけの手が誤判定される。
pub struct GestureClassifier {
    config: GestureConfig,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// 1ティック分の特徴量を分類する。必ず1つのジェスチャーを返す。
    pub fn classify(&self, features: &FeatureSet) -> Gesture {
        if self.is_fist(features) {
            Gesture::Fist
        } else if self.is_pinch(features) {
            Gesture::Pinch
        } else if self.is_point(features) {
            Gesture::Point
        } else if self.is_zoom_pose(features) {
            Gesture::Zoom
        } else {
            Gesture::Open
        }
    }

    /// 非親指4本の指先がすべて手首に近い
    fn is_fist(&self, features: &FeatureSet) -> bool {
        features
            .extensions
            .iter()
            .all(|ext| *ext < self.config.fist_max_extension)
    }

    /// 親指先と人差し指先が接触している
    fn is_pinch(&self, features: &FeatureSet) -> bool {
        features.pinch_distance < self.config.pinch_max_distance
    }

    /// 人差し指が伸び、残り3本がそれより十分曲がっている
    fn is_point(&self, features: &FeatureSet) -> bool {
        let index = features.index_extension();
        index > self.config.point_min_extension
            && features.extensions[1] < index * self.config.point_curl_ratio
            && features.extensions[2] < index * self.config.point_curl_ratio
            && features.extensions[3] < index * self.config.point_curl_ratio
    }

    /// 指を閉じて揃えたポーズ
    fn is_zoom_pose(&self, features: &FeatureSet) -> bool {
        features.spread_ratio < self.config.zoom_max_spread_ratio
    }
}
