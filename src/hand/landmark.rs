/// MediaPipe Hands の 21 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl LandmarkIndex {
    pub const COUNT: usize = 21;

    /// 非親指4本（人差し指〜小指）の指先
    pub const FINGERTIPS: [Self; 4] = [
        Self::IndexTip,
        Self::MiddleTip,
        Self::RingTip,
        Self::PinkyTip,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Wrist),
            1 => Some(Self::ThumbCmc),
            2 => Some(Self::ThumbMcp),
            3 => Some(Self::ThumbIp),
            4 => Some(Self::ThumbTip),
            5 => Some(Self::IndexMcp),
            6 => Some(Self::IndexPip),
            7 => Some(Self::IndexDip),
            8 => Some(Self::IndexTip),
            9 => Some(Self::MiddleMcp),
            10 => Some(Self::MiddlePip),
            11 => Some(Self::MiddleDip),
            12 => Some(Self::MiddleTip),
            13 => Some(Self::RingMcp),
            14 => Some(Self::RingPip),
            15 => Some(Self::RingDip),
            16 => Some(Self::RingTip),
            17 => Some(Self::PinkyMcp),
            18 => Some(Self::PinkyPip),
            19 => Some(Self::PinkyDip),
            20 => Some(Self::PinkyTip),
            _ => None,
        }
    }
}

/// 単一ランドマーク
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f32,
    /// 正規化されたY座標 (0.0〜1.0)
    pub y: f32,
    /// 手首基準の相対深度（距離計算には使わない）
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// 画像平面（XY）上のユークリッド距離
    /// ジェスチャー判定はすべて2D投影で行う。zは将来拡張用。
    pub fn distance_2d(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// ピクセル座標に変換
    pub fn to_pixel(&self, width: u32, height: u32) -> (i32, i32) {
        let px = (self.x * width as f32) as i32;
        let py = (self.y * height as f32) as i32;
        (px, py)
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }
}

/// 検出された1つの手（21ランドマーク）
#[derive(Debug, Clone)]
pub struct Hand {
    pub points: [Point3; LandmarkIndex::COUNT],
}

impl Hand {
    pub fn new(points: [Point3; LandmarkIndex::COUNT]) -> Self {
        Self { points }
    }

    pub fn get(&self, index: LandmarkIndex) -> &Point3 {
        &self.points[index as usize]
    }

    /// 手首からの距離（2D）
    pub fn wrist_distance(&self, index: LandmarkIndex) -> f32 {
        self.get(index).distance_2d(self.get(LandmarkIndex::Wrist))
    }

    /// X軸反転コピー（ミラー表示用）
    pub fn mirrored(&self) -> Hand {
        let mut points = self.points;
        for p in points.iter_mut() {
            p.x = 1.0 - p.x;
        }
        Hand::new(points)
    }
}

/// 1ティック分の推論結果。手が映っていないティックも正常値。
/// 毎ティック生成し、使い捨てる（バッファリングしない）。
#[derive(Debug, Clone)]
pub struct HandFrame {
    pub hand: Option<Hand>,
}

impl HandFrame {
    pub fn detected(hand: Hand) -> Self {
        Self { hand: Some(hand) }
    }

    pub fn absent() -> Self {
        Self { hand: None }
    }

    pub fn is_present(&self) -> bool {
        self.hand.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_index_count() {
        assert_eq!(LandmarkIndex::COUNT, 21);
    }

    #[test]
    fn test_landmark_index_from_index() {
        assert_eq!(LandmarkIndex::from_index(0), Some(LandmarkIndex::Wrist));
        assert_eq!(LandmarkIndex::from_index(8), Some(LandmarkIndex::IndexTip));
        assert_eq!(LandmarkIndex::from_index(9), Some(LandmarkIndex::MiddleMcp));
        assert_eq!(LandmarkIndex::from_index(20), Some(LandmarkIndex::PinkyTip));
        assert_eq!(LandmarkIndex::from_index(21), None);
    }

    #[test]
    fn test_distance_2d_ignores_z() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.3, 0.4, 9.0);
        assert!((a.distance_2d(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_to_pixel() {
        let p = Point3::new(0.5, 0.25, 0.0);
        let (px, py) = p.to_pixel(640, 480);
        assert_eq!(px, 320);
        assert_eq!(py, 120);
    }

    #[test]
    fn test_wrist_distance() {
        let mut points = [Point3::default(); LandmarkIndex::COUNT];
        points[LandmarkIndex::Wrist as usize] = Point3::new(0.5, 0.5, 0.0);
        points[LandmarkIndex::IndexTip as usize] = Point3::new(0.5, 0.2, 0.0);
        let hand = Hand::new(points);
        assert!((hand.wrist_distance(LandmarkIndex::IndexTip) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_mirrored_flips_x_only() {
        let mut points = [Point3::default(); LandmarkIndex::COUNT];
        points[LandmarkIndex::Wrist as usize] = Point3::new(0.2, 0.7, 0.1);
        let mirrored = Hand::new(points).mirrored();
        let wrist = mirrored.get(LandmarkIndex::Wrist);
        assert!((wrist.x - 0.8).abs() < 1e-6);
        assert_eq!(wrist.y, 0.7);
        assert_eq!(wrist.z, 0.1);
    }

    #[test]
    fn test_hand_frame_presence() {
        assert!(!HandFrame::absent().is_present());
        let hand = Hand::new([Point3::default(); LandmarkIndex::COUNT]);
        assert!(HandFrame::detected(hand).is_present());
    }
}
