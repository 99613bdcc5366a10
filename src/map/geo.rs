// src/map/geo.rs
use crate::domain::Coordinates;
use std::f64::consts::PI;

pub const TILE_SIZE: f64 = 256.0;
pub const MAX_ZOOM: f64 = 21.0;
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every valid coordinate. `None` when there is none.
    pub fn covering<I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        points
            .into_iter()
            .filter(|c| c.is_valid())
            .fold(None, |acc: Option<Bounds>, c| {
                Some(match acc {
                    None => Bounds {
                        south: c.lat,
                        west: c.lng,
                        north: c.lat,
                        east: c.lng,
                    },
                    Some(b) => Bounds {
                        south: b.south.min(c.lat),
                        west: b.west.min(c.lng),
                        north: b.north.max(c.lat),
                        east: b.east.max(c.lng),
                    },
                })
            })
    }

    pub fn contains(&self, c: Coordinates) -> bool {
        (self.south..=self.north).contains(&c.lat) && (self.west..=self.east).contains(&c.lng)
    }

    /// Center in projected space, so it matches what a Web Mercator map shows.
    pub fn center(&self) -> Coordinates {
        let (x1, y1) = project(Coordinates::new(self.north, self.west), 0.0);
        let (x2, y2) = project(Coordinates::new(self.south, self.east), 0.0);
        unproject(((x1 + x2) / 2.0, (y1 + y2) / 2.0), 0.0)
    }

    /// Highest zoom at which the box fits in a `width` x `height` viewport
    /// with `padding` pixels on each side. A single point fits at [`MAX_ZOOM`].
    pub fn zoom_to_fit(&self, width: f64, height: f64, padding: f64) -> f64 {
        let (x1, y1) = project(Coordinates::new(self.north, self.west), 0.0);
        let (x2, y2) = project(Coordinates::new(self.south, self.east), 0.0);
        let span_x = (x2 - x1).abs();
        let span_y = (y2 - y1).abs();

        let avail_x = (width - 2.0 * padding).max(1.0);
        let avail_y = (height - 2.0 * padding).max(1.0);

        let zoom_x = if span_x > 0.0 { (avail_x / span_x).log2() } else { MAX_ZOOM };
        let zoom_y = if span_y > 0.0 { (avail_y / span_y).log2() } else { MAX_ZOOM };

        zoom_x.min(zoom_y).floor().clamp(0.0, MAX_ZOOM)
    }
}

/// Web Mercator world pixel coordinates at `zoom`.
pub fn project(c: Coordinates, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE * 2f64.powf(zoom);
    let lat = c.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (c.lng + 180.0) / 360.0 * scale;
    let y = (0.5 - ((PI / 4.0 + lat / 2.0).tan().ln()) / (2.0 * PI)) * scale;
    (x, y)
}

pub fn unproject((x, y): (f64, f64), zoom: f64) -> Coordinates {
    let scale = TILE_SIZE * 2f64.powf(zoom);
    let lng = x / scale * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / scale);
    let lat = n.sinh().atan().to_degrees();
    Coordinates::new(lat, lng)
}
