/// Colors of the synthetic track scene.
pub const SKY: [u8; 3] = [90, 110, 140];
pub const TRACK: [u8; 3] = [210, 205, 190];
pub const GROUND: [u8; 3] = [40, 70, 30];

/// Geometry of a synthetic scene: a vertical track band `[left, right)`
/// below a horizon at row `horizon_y`.
#[derive(Clone, Copy, Debug)]
pub struct TrackScene {
    pub width: usize,
    pub height: usize,
    pub left: usize,
    pub right: usize,
    pub horizon_y: usize,
}

impl TrackScene {
    pub fn color_at(&self, x: usize, y: usize) -> [u8; 3] {
        if y < self.horizon_y {
            SKY
        } else if (self.left..self.right).contains(&x) {
            TRACK
        } else {
            GROUND
        }
    }

    /// Packed RGB buffer of the scene.
    pub fn rgb(&self) -> Vec<u8> {
        assert!(self.width > 0 && self.height > 0, "image dimensions must be positive");
        let mut img = Vec::with_capacity(self.width * self.height * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                img.extend_from_slice(&self.color_at(x, y));
            }
        }
        img
    }

    /// Single-channel scene using the green channel as intensity.
    pub fn luma(&self) -> Vec<u8> {
        self.rgb().chunks_exact(3).map(|px| px[1]).collect()
    }

    pub fn rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_raw(self.width as u32, self.height as u32, self.rgb())
            .expect("buffer matches dimensions")
    }
}

/// Allowed horizon error: one stripe of the horizon profile.
pub fn stripe_fraction(profile_len: usize) -> f32 {
    (profile_len / 16) as f32 / profile_len as f32
}
