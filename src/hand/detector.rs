use anyhow::{Context, Result};
use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;

use super::landmark::{Hand, HandFrame, LandmarkIndex, Point3};
use super::preprocess::LANDMARKER_INPUT_SIZE;

/// MediaPipe Hand Landmarker (ONNX変換版) を使用した手検出器
pub struct HandDetector {
    session: Session,
    presence_threshold: f32,
}

impl HandDetector {
    /// ONNXモデルを読み込んで初期化
    pub fn new<P: AsRef<Path>>(model_path: P, presence_threshold: f32) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path.as_ref())
            .context("Failed to load ONNX model")?;

        Ok(Self {
            session,
            presence_threshold,
        })
    }

    /// 前処理済みテンソルから手ランドマークを検出
    ///
    /// 入力: [1, 224, 224, 3] の f32 テンソル
    /// 出力: HandFrame（スコアが閾値未満なら absent）
    pub fn infer(&mut self, input: Array4<f32>) -> Result<HandFrame> {
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs!["input_1" => input_tensor])
            .context("Inference failed")?;

        // 手の存在スコア [1, 1]
        let presence: ndarray::ArrayViewD<f32> = outputs["Identity_1"]
            .try_extract_array()
            .context("Failed to extract presence score")?;

        if presence[[0, 0]] < self.presence_threshold {
            return Ok(HandFrame::absent());
        }

        // ランドマーク出力は [1, 63] (x, y, z を21点分、入力サイズ基準のピクセル座標)
        let output: ndarray::ArrayViewD<f32> = outputs["Identity"]
            .try_extract_array()
            .context("Failed to extract landmark tensor")?;

        let scale = LANDMARKER_INPUT_SIZE as f32;
        let mut points = [Point3::default(); LandmarkIndex::COUNT];

        for i in 0..LandmarkIndex::COUNT {
            let x = output[[0, i * 3]] / scale;
            let y = output[[0, i * 3 + 1]] / scale;
            let z = output[[0, i * 3 + 2]] / scale;
            points[i] = Point3::new(x, y, z);
        }

        Ok(HandFrame::detected(Hand::new(points)))
    }
}
