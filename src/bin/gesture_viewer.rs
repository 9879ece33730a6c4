use anyhow::Result;
use std::time::Instant;

use gesture_control::camera::OpenCvCamera;
use gesture_control::config::Config;
use gesture_control::control::Pipeline;
use gesture_control::gesture::Gesture;
use gesture_control::hand::{preprocess_for_landmarker, HandDetector};
use gesture_control::render::MinifbRenderer;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    println!("Gesture Viewer");
    println!("Press ESC to exit");

    let config = Config::load_or_default(CONFIG_PATH);

    // カメラを開く
    println!("Opening camera...");
    let mut camera = OpenCvCamera::open(&config.camera)?;
    let (width, height) = camera.resolution();
    println!("Camera resolution: {}x{}", width, height);

    // モデルを読み込む
    println!("Loading model from {}...", config.detector.model_path);
    let mut detector = HandDetector::new(
        &config.detector.model_path,
        config.detector.presence_threshold,
    )?;
    println!("Model loaded");

    // ウィンドウを作成
    let mut renderer = MinifbRenderer::new("Gesture Viewer", width as usize, height as usize)?;

    let mut pipeline = Pipeline::new(&config);

    // FPS計測用
    let mut frame_count = 0u32;
    let mut fps_timer = Instant::now();
    let mut last_gesture = None;

    // メインループ
    while renderer.is_open() {
        // フレームを取得
        let frame = match camera.read_frame() {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Frame capture error: {}", e);
                continue;
            }
        };

        // 前処理と推論
        let input = preprocess_for_landmarker(&frame)?;
        let result = detector.infer(input)?;

        // 分類と出力変換（ビューアではイベント自体は使わない）
        let _ = pipeline.process(&result, Instant::now());
        let gesture = pipeline.last_gesture();

        if gesture != last_gesture {
            println!("モード: {}", mode_caption(gesture));
            last_gesture = gesture;
        }

        // 描画。表示は鏡像にする
        let mut mirrored_frame = opencv::core::Mat::default();
        opencv::core::flip(&frame, &mut mirrored_frame, 1)?;
        renderer.draw_frame(&mirrored_frame)?;

        if let Some(hand) = &result.hand {
            renderer.draw_hand(&hand.mirrored(), gesture);
        }
        renderer.update()?;

        // FPS計算
        frame_count += 1;
        let elapsed = fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = frame_count as f32 / elapsed;
            let label = gesture.map(|g| g.name()).unwrap_or("none");
            println!("FPS: {:.1}, Gesture: {}", fps, label);
            frame_count = 0;
            fps_timer = Instant::now();
        }
    }

    println!("Shutting down...");
    Ok(())
}

fn mode_caption(gesture: Option<Gesture>) -> &'static str {
    match gesture {
        Some(Gesture::Open) => "回転",
        Some(Gesture::Point) => "カーソル",
        Some(Gesture::Pinch) => "クリック",
        Some(Gesture::Zoom) => "ズーム",
        Some(Gesture::Fist) => "停止ポーズ",
        None => "待機中",
    }
}
