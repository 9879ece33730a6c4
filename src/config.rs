use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub control: ControlConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    /// カメラデバイス番号
    #[serde(default)]
    pub index: i32,
    /// キャプチャ幅（ピクセル）
    #[serde(default = "default_camera_width")]
    pub width: u32,
    /// キャプチャ高さ（ピクセル）
    #[serde(default = "default_camera_height")]
    pub height: u32,
    /// キャプチャFPS
    #[serde(default = "default_camera_fps")]
    pub fps: u32,
}

fn default_camera_width() -> u32 { 320 }
fn default_camera_height() -> u32 { 240 }
fn default_camera_fps() -> u32 { 30 }

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: default_camera_width(),
            height: default_camera_height(),
            fps: default_camera_fps(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    /// ONNXモデルのパス
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// 手が映っていると判定する最低スコア
    #[serde(default = "default_presence_threshold")]
    pub presence_threshold: f32,
}

fn default_model_path() -> String { "models/hand_landmarker.onnx".to_string() }
fn default_presence_threshold() -> f32 { 0.5 }

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            presence_threshold: default_presence_threshold(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GestureConfig {
    /// 非親指4本の伸長距離がすべてこの値未満ならFist（正規化座標）
    #[serde(default = "default_fist_max_extension")]
    pub fist_max_extension: f32,
    /// 親指先-人差し指先の距離がこの値未満ならPinch（正規化座標）
    #[serde(default = "default_pinch_max_distance")]
    pub pinch_max_distance: f32,
    /// Point判定に必要な人差し指の最低伸長距離
    #[serde(default = "default_point_min_extension")]
    pub point_min_extension: f32,
    /// Point判定: 中指・薬指・小指が人差し指のこの倍率未満に曲がっていること
    #[serde(default = "default_point_curl_ratio")]
    pub point_curl_ratio: f32,
    /// 指の広がり比率がこの値未満ならZoomポーズ
    #[serde(default = "default_zoom_max_spread_ratio")]
    pub zoom_max_spread_ratio: f32,
}

fn default_fist_max_extension() -> f32 { 0.35 }
fn default_pinch_max_distance() -> f32 { 0.05 }
fn default_point_min_extension() -> f32 { 0.25 }
fn default_point_curl_ratio() -> f32 { 0.7 }
fn default_zoom_max_spread_ratio() -> f32 { 0.45 }

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            fist_max_extension: default_fist_max_extension(),
            pinch_max_distance: default_pinch_max_distance(),
            point_min_extension: default_point_min_extension(),
            point_curl_ratio: default_point_curl_ratio(),
            zoom_max_spread_ratio: default_zoom_max_spread_ratio(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ControlConfig {
    /// 回転アンカーのEMA係数（小さいほど滑らか）
    #[serde(default = "default_rotation_smoothing")]
    pub rotation_smoothing: f32,
    /// カーソルアンカーのEMA係数（回転より反応重視）
    #[serde(default = "default_cursor_smoothing")]
    pub cursor_smoothing: f32,
    /// クリックのデバウンス間隔（ミリ秒）
    #[serde(default = "default_click_debounce_ms")]
    pub click_debounce_ms: u64,
}

fn default_rotation_smoothing() -> f32 { 0.2 }
fn default_cursor_smoothing() -> f32 { 0.4 }
fn default_click_debounce_ms() -> u64 { 300 }

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            rotation_smoothing: default_rotation_smoothing(),
            cursor_smoothing: default_cursor_smoothing(),
            click_debounce_ms: default_click_debounce_ms(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがない・壊れている場合はデフォルト値で起動する
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config load failed ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
