use crate::gesture::Gesture;
use crate::hand::LandmarkIndex;

/// 手の骨格の接続定義 (開始ランドマーク, 終了ランドマーク)
pub const HAND_CONNECTIONS: [(LandmarkIndex, LandmarkIndex); 21] = [
    // 親指
    (LandmarkIndex::Wrist, LandmarkIndex::ThumbCmc),
    (LandmarkIndex::ThumbCmc, LandmarkIndex::ThumbMcp),
    (LandmarkIndex::ThumbMcp, LandmarkIndex::ThumbIp),
    (LandmarkIndex::ThumbIp, LandmarkIndex::ThumbTip),
    // 人差し指
    (LandmarkIndex::Wrist, LandmarkIndex::IndexMcp),
    (LandmarkIndex::IndexMcp, LandmarkIndex::IndexPip),
    (LandmarkIndex::IndexPip, LandmarkIndex::IndexDip),
    (LandmarkIndex::IndexDip, LandmarkIndex::IndexTip),
    // 中指
    (LandmarkIndex::IndexMcp, LandmarkIndex::MiddleMcp),
    (LandmarkIndex::MiddleMcp, LandmarkIndex::MiddlePip),
    (LandmarkIndex::MiddlePip, LandmarkIndex::MiddleDip),
    (LandmarkIndex::MiddleDip, LandmarkIndex::MiddleTip),
    // 薬指
    (LandmarkIndex::MiddleMcp, LandmarkIndex::RingMcp),
    (LandmarkIndex::RingMcp, LandmarkIndex::RingPip),
    (LandmarkIndex::RingPip, LandmarkIndex::RingDip),
    (LandmarkIndex::RingDip, LandmarkIndex::RingTip),
    // 小指
    (LandmarkIndex::RingMcp, LandmarkIndex::PinkyMcp),
    (LandmarkIndex::Wrist, LandmarkIndex::PinkyMcp),
    (LandmarkIndex::PinkyMcp, LandmarkIndex::PinkyPip),
    (LandmarkIndex::PinkyPip, LandmarkIndex::PinkyDip),
    (LandmarkIndex::PinkyDip, LandmarkIndex::PinkyTip),
];

/// ランドマーク点の色 (RGB)
pub const LANDMARK_COLOR: u32 = 0xFFFFFF; // 白

/// ピンチ時の親指-人差し指間の線の色 (RGB)
pub const PINCH_LINK_COLOR: u32 = 0x0088FF; // 青

/// ポイント時の親指-人差し指間の線の色 (RGB)
pub const POINT_LINK_COLOR: u32 = 0xFFFF00; // 黄色

/// ジェスチャーごとの骨格線の色 (RGB)
pub fn skeleton_color(gesture: Option<Gesture>) -> u32 {
    match gesture {
        Some(Gesture::Zoom) => 0x00FFFF,  // シアン
        Some(Gesture::Fist) => 0xFF0000,  // 赤
        Some(Gesture::Point) => 0xFFFF00, // 黄色
        Some(Gesture::Pinch) => 0xFFFFFF, // 白
        Some(Gesture::Open) | None => 0x00FF00, // 緑
    }
}
