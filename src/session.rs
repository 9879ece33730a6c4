use anyhow::Result;
use opencv::core::Mat;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use crate::camera::OpenCvCamera;
use crate::config::Config;
use crate::control::{ControlEvent, Pipeline};
use crate::gesture::Gesture;
use crate::hand::{HandDetector, HandFrame};

/// フレーム供給源。ティックごとに1フレーム返す。
pub trait FrameSource: Send {
    fn read(&mut self) -> Result<Mat>;
}

/// 手ランドマーク推論。フレームごとに0または1つの手を返す。
pub trait HandOracle: Send {
    fn detect(&mut self, frame: &Mat) -> Result<HandFrame>;
}

impl HandOracle for HandDetector {
    fn detect(&mut self, frame: &Mat) -> Result<HandFrame> {
        let input = crate::hand::preprocess_for_landmarker(frame)?;
        self.infer(input)
    }
}

/// セッションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Inactive,
    Initializing,
    Active,
    /// ワーカーが実行時エラーで停止した。deactivateでInactiveに戻る
    Error,
}

/// 出力コールバック一式。未設定のものは単に無視される。
#[derive(Default)]
pub struct Callbacks {
    pub on_hand_move: Option<Box<dyn FnMut(f32, f32) + Send>>,
    pub on_cursor_move: Option<Box<dyn FnMut(f32, f32) + Send>>,
    pub on_zoom: Option<Box<dyn FnMut(f32) + Send>>,
    pub on_click: Option<Box<dyn FnMut() + Send>>,
    pub on_gesture: Option<Box<dyn FnMut(Gesture) + Send>>,
    pub on_error: Option<Box<dyn FnMut(String) + Send>>,
}

impl Callbacks {
    fn dispatch(&mut self, event: &ControlEvent) {
        match *event {
            ControlEvent::HandMove { x, y } => {
                if let Some(cb) = self.on_hand_move.as_mut() {
                    cb(x, y);
                }
            }
            ControlEvent::CursorMove { x, y } => {
                if let Some(cb) = self.on_cursor_move.as_mut() {
                    cb(x, y);
                }
            }
            ControlEvent::Zoom { factor } => {
                if let Some(cb) = self.on_zoom.as_mut() {
                    cb(factor);
                }
            }
            ControlEvent::Click => {
                if let Some(cb) = self.on_click.as_mut() {
                    cb();
                }
            }
            ControlEvent::Gesture(gesture) => {
                if let Some(cb) = self.on_gesture.as_mut() {
                    cb(gesture);
                }
            }
        }
    }

    fn report_error(&mut self, message: String) {
        if let Some(cb) = self.on_error.as_mut() {
            cb(message);
        }
    }
}

/// カメラ・推論・パイプラインの起動と停止を管理する
///
/// activateでリソースを取得してワーカースレッドを起動し、deactivateで
/// 同期的に停止する。deactivate完了後はコールバックが一切発火しないことを
/// 保証する。推論中にdeactivateされた場合、その結果は破棄される。
pub struct Session {
    config: Config,
    callbacks: Arc<Mutex<Callbacks>>,
    active: Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
    state: SessionState,
}

impl Session {
    pub fn new(config: Config, callbacks: Callbacks) -> Self {
        Self {
            config,
            callbacks: Arc::new(Mutex::new(callbacks)),
            active: Arc::new(AtomicBool::new(false)),
            worker: None,
            state: SessionState::Inactive,
        }
    }

    pub fn state(&self) -> SessionState {
        // ワーカーが自発停止していたら実行時エラー
        if self.state == SessionState::Active && !self.active.load(Ordering::SeqCst) {
            SessionState::Error
        } else {
            self.state
        }
    }

    /// カメラと推論モデルを開いてセッションを開始する
    ///
    /// 初期化に失敗した場合はon_errorで報告し、Inactiveのまま戻る。
    /// 呼び出し側はそのまま再試行できる。
    pub fn activate(&mut self) -> Result<()> {
        self.state = SessionState::Initializing;

        let camera = match OpenCvCamera::open(&self.config.camera) {
            Ok(camera) => camera,
            Err(e) => {
                self.state = SessionState::Inactive;
                let message = format!("Camera initialization failed: {:#}", e);
                self.callbacks.lock().unwrap().report_error(message);
                return Err(e);
            }
        };

        let detector = match HandDetector::new(
            &self.config.detector.model_path,
            self.config.detector.presence_threshold,
        ) {
            Ok(detector) => detector,
            Err(e) => {
                self.state = SessionState::Inactive;
                let message = format!("Model initialization failed: {:#}", e);
                self.callbacks.lock().unwrap().report_error(message);
                return Err(e);
            }
        };

        self.activate_with(Box::new(camera), Box::new(detector));
        Ok(())
    }

    /// 構築済みのフレーム供給源と推論器でセッションを開始する
    pub fn activate_with(
        &mut self,
        mut source: Box<dyn FrameSource>,
        mut oracle: Box<dyn HandOracle>,
    ) {
        // 前回のワーカーが残っていたら先に止める
        if self.worker.is_some() {
            self.deactivate();
        }

        self.state = SessionState::Initializing;
        self.active.store(true, Ordering::SeqCst);

        let active = self.active.clone();
        let callbacks = self.callbacks.clone();
        let mut pipeline = Pipeline::new(&self.config);
        pipeline.reset();

        let handle = thread::spawn(move || {
            while active.load(Ordering::SeqCst) {
                let frame = match source.read() {
                    Ok(frame) => frame,
                    Err(e) => {
                        active.store(false, Ordering::SeqCst);
                        callbacks
                            .lock()
                            .unwrap()
                            .report_error(format!("Frame capture failed: {:#}", e));
                        break;
                    }
                };

                let result = match oracle.detect(&frame) {
                    Ok(result) => result,
                    Err(e) => {
                        active.store(false, Ordering::SeqCst);
                        callbacks
                            .lock()
                            .unwrap()
                            .report_error(format!("Inference failed: {:#}", e));
                        break;
                    }
                };

                // 推論中にdeactivateされていたら結果を捨てる
                if !active.load(Ordering::SeqCst) {
                    break;
                }

                let events = pipeline.process(&result, Instant::now());
                let mut callbacks = callbacks.lock().unwrap();
                for event in &events {
                    callbacks.dispatch(event);
                }
            }
        });

        self.worker = Some(handle);
        self.state = SessionState::Active;
    }

    /// セッションを同期的に停止する
    ///
    /// 戻った時点でワーカーは終了済みで、以降コールバックは発火しない。
    pub fn deactivate(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        self.state = SessionState::Inactive;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.deactivate();
    }
}
