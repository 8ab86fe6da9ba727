//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ shape  particles  camera z  hands                  (status)  │
//! │                                                              │
//! │              · ·:·:.  particle field  .:·:· ·                │
//! │                 (+) hand markers, labelled by gesture        │
//! │                                                              │
//! │ key legend                                                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Particles are projected through a pinhole camera on the +z axis looking
//! at the origin and splatted additively, so dense regions bloom.

use std::sync::mpsc::Sender;

use glam::{Vec2, Vec3};
use hand_gesture::{Gesture, HandState};
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};
use particle_field::ParticleEngine;

use crate::camera::CameraZoom;
use crate::raster;
use crate::source::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:     usize = 1280;
pub const WIN_H:     usize = 720;
pub const ASPECT:    f32   = WIN_W as f32 / WIN_H as f32;
const BG_COLOR:      u32   = 0xFF05050A;
const STATUS_COLOR:  u32   = 0xFFEEEEEE;
const LEGEND_COLOR:  u32   = 0xFF888888;
/// Per-particle contribution before additive accumulation.
const SPLAT_GAIN:    f32   = 0.35;
/// Points nearer the camera than this are culled.
const NEAR_PLANE:    f32   = 0.1;

const POSE_KEYS: [Key; 7] = [
    Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5, Key::Key6, Key::Key7,
];

// ════════════════════════════════════════════════════════════════════════════
// UiCommand
// ════════════════════════════════════════════════════════════════════════════

/// Window actions handled by the application rather than the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    NextShape,
    SwapColors,
}

// ════════════════════════════════════════════════════════════════════════════
// Projection
// ════════════════════════════════════════════════════════════════════════════

/// Pinhole projection of a world point to pixel coordinates plus depth.
/// `None` when the point is behind the near plane.
pub fn project(p: Vec3, camera_z: f32, fov_deg: f32, width: usize, height: usize) -> Option<(Vec2, f32)> {
    let depth = camera_z - p.z;
    if !(depth > NEAR_PLANE) {
        return None;
    }
    let tan_half = (fov_deg.to_radians() * 0.5).tan();
    let aspect = width as f32 / height as f32;
    let ndc = Vec2::new(p.x / (depth * tan_half * aspect), p.y / (depth * tan_half));
    let px = Vec2::new((ndc.x + 1.0) * 0.5 * width as f32, (1.0 - ndc.y) * 0.5 * height as f32);
    Some((px, depth))
}

/// Map an HDR colour to opaque ARGB, saturating each channel.
pub fn to_argb(c: Vec3) -> u32 {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u32;
    0xFF000000 | (q(c.x) << 16) | (q(c.y) << 8) | q(c.z)
}

fn gesture_color(g: Gesture) -> u32 {
    match g {
        Gesture::Pinch      => 0xFF00FFAA,
        Gesture::Closed     => 0xFFFF8800,
        Gesture::ThumbsUp   => 0xFF66CCFF,
        Gesture::ThumbsDown => 0xFFFF4466,
        _                   => 0xFFFFFFFF,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:  Window,
    buf:     Vec<u32>,
    accum:   Vec<Vec3>,
    sim_tx:  Sender<SimInput>,
    last_pointer: Option<Vec2>,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "Leap Particles — gesture-driven particle field",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf:   vec![BG_COLOR; WIN_W * WIN_H],
            accum: vec![Vec3::ZERO; WIN_W * WIN_H],
            sim_tx,
            last_pointer: None,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll mouse and keyboard.  Hand inputs go to the simulator; app-level
    /// actions are appended to `commands`.  Returns false on quit.
    pub fn poll_input(&mut self, commands: &mut Vec<UiCommand>) -> bool {
        if !self.window.is_open() { return false; }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            let _ = self.sim_tx.send(SimInput::Quit);
            return false;
        }

        let shift = self.window.is_key_down(Key::LeftShift)
                 || self.window.is_key_down(Key::RightShift);
        for (i, key) in POSE_KEYS.iter().enumerate() {
            if one_shot(*key) {
                let hand = if shift { 1 } else { 0 };
                let _ = self.sim_tx.send(SimInput::Pose { hand, gesture: Gesture::ALL[i] });
            }
        }
        if one_shot(Key::H) {
            let _ = self.sim_tx.send(SimInput::ToggleSecondHand);
        }
        if one_shot(Key::C) {
            let _ = self.sim_tx.send(SimInput::Clear);
        }
        if one_shot(Key::Space) || one_shot(Key::N) {
            commands.push(UiCommand::NextShape);
        }
        if one_shot(Key::X) {
            commands.push(UiCommand::SwapColors);
        }

        // Pointer in unit image space; only forwarded when it moves.
        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Discard) {
            let p = Vec2::new(mx / WIN_W as f32, my / WIN_H as f32);
            if self.last_pointer.map_or(true, |last| last.distance(p) > 1e-4) {
                self.last_pointer = Some(p);
                let _ = self.sim_tx.send(SimInput::Pointer(p));
            }
        }

        true
    }

    /// Render one frame.
    pub fn render(&mut self, engine: &ParticleEngine, hands: &HandState, camera: &CameraZoom, status: &str) {
        self.accum.fill(Vec3::ZERO);

        // ── Particles ─────────────────────────────────────────────────────
        let rotation = engine.rotation();
        for (p, c) in engine.positions().iter().zip(engine.colors()) {
            let world = rotation * *p;
            if let Some((px, depth)) = project(world, camera.z(), camera.fov_deg(), WIN_W, WIN_H) {
                let radius = if depth < 4.0 { 1 } else { 0 };
                self.splat(px, radius, *c * SPLAT_GAIN);
            }
        }
        for (dst, src) in self.buf.iter_mut().zip(&self.accum) {
            *dst = if *src == Vec3::ZERO { BG_COLOR } else { to_argb(*src) };
        }

        // ── Hand markers ──────────────────────────────────────────────────
        let viewport = engine.viewport();
        for hand in hands.iter() {
            let world = viewport.to_world(hand.position);
            if let Some((px, _)) = project(world, camera.z(), camera.fov_deg(), WIN_W, WIN_H) {
                let color = gesture_color(hand.gesture);
                self.draw_ring(px, 14.0, color);
                self.draw_label(hand.gesture.as_str(), px.x as usize + 18, px.y as usize, color);
            }
        }

        // ── Status bar and key legend ─────────────────────────────────────
        self.draw_label(status, 10, 10, STATUS_COLOR);
        self.draw_label(
            "mouse=move  1-7=pose  shift+1-7=second hand pose  h=second hand  c=clear  space=next shape  x=swap colors  q=quit",
            10, WIN_H - 16, LEGEND_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn splat(&mut self, centre: Vec2, radius: isize, color: Vec3) {
        let (cx, cy) = (centre.x.floor() as isize, centre.y.floor() as isize);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
                    self.accum[y as usize * WIN_W + x as usize] += color;
                }
            }
        }
    }

    fn draw_ring(&mut self, centre: Vec2, r: f32, color: u32) {
        let steps = (r * 8.0) as usize;
        for i in 0..steps {
            let a = i as f32 / steps as f32 * std::f32::consts::TAU;
            let p = centre + Vec2::new(a.cos(), a.sin()) * r;
            if p.x >= 0.0 && p.y >= 0.0 {
                self.blend_pixel(p.x as usize, p.y as usize, color, 0.8);
            }
        }
    }

    fn blend_pixel(&mut self, x: usize, y: usize, color: u32, t: f32) {
        if x < WIN_W && y < WIN_H {
            let i = y * WIN_W + x;
            self.buf[i] = raster::blend(self.buf[i], color, t);
        }
    }

    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        raster::draw_text(&mut self.buf, WIN_W, text, x, y, color);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
