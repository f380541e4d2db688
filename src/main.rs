use track_finder::{Frame, TrackDetector, TrackParams};

fn main() {
    env_logger::init();
    // Demo stub: synthesizes a track frame and runs the detector
    let (w, h) = (320usize, 240usize);
    let (left, right, horizon_y) = (100usize, 220usize, 80usize);
    let mut rgb = vec![0u8; w * h * 3];
    for (i, px) in rgb.chunks_exact_mut(3).enumerate() {
        let (x, y) = (i % w, i / w);
        let color = if y < horizon_y {
            [90, 110, 140]
        } else if (left..right).contains(&x) {
            [210, 205, 190]
        } else {
            [40, 70, 30]
        };
        px.copy_from_slice(&color);
    }

    let frame = match Frame::rgb(w, h, rgb) {
        Ok(frame) => frame,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let det = TrackDetector::new(TrackParams::default());
    match det.process(&frame) {
        Ok(res) => println!(
            "found={} target={:?} horizon={:?} latency_ms={:.3}",
            res.found(),
            res.target.map(|t| (t.left, t.right)),
            res.horizon.map(|hz| hz.fraction),
            res.latency_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
