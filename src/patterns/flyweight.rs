//! Flyweight exercise
//!
//! One big image resource holds the pixels of several small images side by
//! side. Each flyweight shares that resource and only carries its own
//! context: which slice of the resource to draw, where, and how fast it
//! moves.

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

const DISPLAY_WIDTH: usize = 80;
const DISPLAY_HEIGHT: usize = 20;
const IMAGE_WIDTH: usize = 30;
const IMAGE_HEIGHT: usize = 5;
const NUM_FLYWEIGHTS: usize = 5;
const BACKGROUND: char = '~';

/// Character grid the flyweights are drawn into
pub type Display = Vec<Vec<char>>;

/// The shared image data
#[derive(Debug)]
pub struct BigResource {
    rows: Vec<Vec<char>>,
}

impl BigResource {
    pub fn new(rows: Vec<String>) -> Self {
        Self {
            rows: rows.into_iter().map(|row| row.chars().collect()).collect(),
        }
    }

    /// Generate `num_images` framed images side by side, each filled with
    /// its index digit
    pub fn generate(num_images: usize, width: usize, height: usize) -> Self {
        let num_images = num_images.clamp(1, 9);
        let width = width.max(3);
        let height = height.max(3);

        let rows = (0..height)
            .map(|row| {
                (0..num_images)
                    .map(|image| {
                        if row == 0 || row + 1 == height {
                            format!("+{}+", "-".repeat(width - 2))
                        } else {
                            format!("|{}|", image.to_string().repeat(width - 2))
                        }
                    })
                    .collect::<String>()
            })
            .collect();
        Self::new(rows)
    }

    /// Draw a `width` x `height` slice starting at column `offset_x` of the
    /// resource at (`x`, `y`), clipped to the display
    pub fn render(
        &self,
        display: &mut Display,
        offset_x: usize,
        width: usize,
        height: usize,
        x: i64,
        y: i64,
    ) {
        for image_row in 0..height {
            let display_y = y + image_row as i64;
            let Some(display_row) = usize::try_from(display_y)
                .ok()
                .and_then(|row| display.get_mut(row))
            else {
                continue;
            };
            let Some(source_row) = self.rows.get(image_row) else {
                continue;
            };
            for image_col in 0..width {
                let display_x = x + image_col as i64;
                let target = usize::try_from(display_x)
                    .ok()
                    .and_then(|col| display_row.get_mut(col));
                if let (Some(cell), Some(pixel)) = (target, source_row.get(offset_x + image_col)) {
                    *cell = *pixel;
                }
            }
        }
    }
}

/// Per-instance state of a flyweight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyweightContext {
    pub offset_x: usize,
    pub image_width: usize,
    pub image_height: usize,
    pub position_x: f64,
    pub position_y: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
}

/// A lightweight handle onto the shared resource
#[derive(Debug, Clone)]
pub struct Flyweight {
    resource: Rc<BigResource>,
    context: FlyweightContext,
}

impl Flyweight {
    pub fn render(&self, display: &mut Display) {
        let c = &self.context;
        self.resource.render(
            display,
            c.offset_x,
            c.image_width,
            c.image_height,
            c.position_x as i64,
            c.position_y as i64,
        );
    }

    /// Advance one step, bouncing off the display edges
    pub fn step(&mut self, display_width: usize, display_height: usize) {
        let c = &mut self.context;
        let (x, vx) = bounce(
            c.position_x + c.velocity_x,
            c.velocity_x,
            c.image_width,
            display_width,
        );
        let (y, vy) = bounce(
            c.position_y + c.velocity_y,
            c.velocity_y,
            c.image_height,
            display_height,
        );
        c.position_x = x;
        c.velocity_x = vx;
        c.position_y = y;
        c.velocity_y = vy;
    }
}

fn bounce(position: f64, velocity: f64, size: usize, limit: usize) -> (f64, f64) {
    let max = limit.saturating_sub(size) as f64;
    if position < 0.0 {
        (0.0, -velocity)
    } else if position > max {
        (max, -velocity)
    } else {
        (position, velocity)
    }
}

/// Owns the big resources and hands out flyweights over them
#[derive(Debug, Default)]
pub struct BigResourceManager {
    resources: Vec<Rc<BigResource>>,
}

impl BigResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource, returning its id
    pub fn add_resource(&mut self, resource: BigResource) -> usize {
        self.resources.push(Rc::new(resource));
        self.resources.len() - 1
    }

    pub fn create_flyweight(&self, resource_id: usize, context: FlyweightContext) -> Option<Flyweight> {
        self.resources.get(resource_id).map(|resource| Flyweight {
            resource: Rc::clone(resource),
            context,
        })
    }
}

fn generate_velocity(rng: &mut impl Rng) -> f64 {
    let speed = f64::from(rng.gen_range(0..5u32) + 1) / 5.0;
    let direction = if rng.gen_range(0..100) > 50 { 1.0 } else { -1.0 };
    speed * direction
}

fn generate_flyweights(
    manager: &BigResourceManager,
    resource_id: usize,
    rng: &mut impl Rng,
) -> Vec<Flyweight> {
    (0..NUM_FLYWEIGHTS)
        .filter_map(|index| {
            let context = FlyweightContext {
                offset_x: index * IMAGE_WIDTH,
                image_width: IMAGE_WIDTH,
                image_height: IMAGE_HEIGHT,
                position_x: rng.gen_range(0..DISPLAY_WIDTH - IMAGE_WIDTH) as f64,
                position_y: rng.gen_range(0..DISPLAY_HEIGHT - IMAGE_HEIGHT) as f64,
                velocity_x: generate_velocity(rng),
                velocity_y: generate_velocity(rng),
            };
            manager.create_flyweight(resource_id, context)
        })
        .collect()
}

pub fn new_display(width: usize, height: usize) -> Display {
    vec![vec![BACKGROUND; width]; height]
}

fn clear_display(display: &mut Display) {
    for row in display.iter_mut() {
        row.fill(BACKGROUND);
    }
}

fn show_display(display: &Display, out: &mut Transcript) {
    for row in display {
        out.line(format!("  {}", row.iter().collect::<String>()));
    }
    out.blank();
}

fn render_all(flyweights: &[Flyweight], display: &mut Display) {
    clear_display(display);
    for flyweight in flyweights {
        flyweight.render(display);
    }
}

pub fn run(config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut manager = BigResourceManager::new();
    let resource_id = manager.add_resource(BigResource::generate(
        NUM_FLYWEIGHTS,
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
    ));
    let mut flyweights = generate_flyweights(&manager, resource_id, &mut rng);
    let mut display = new_display(DISPLAY_WIDTH, DISPLAY_HEIGHT);

    out.line(format!("  The image rendered {} times:", flyweights.len()));
    out.blank();
    render_all(&flyweights, &mut display);
    show_display(&display, out);

    let frames = config.flyweight_frames;
    for frame in 1..=frames {
        for flyweight in flyweights.iter_mut() {
            flyweight.step(DISPLAY_WIDTH, DISPLAY_HEIGHT);
        }
        render_all(&flyweights, &mut display);
        log::trace!("flyweight frame {}/{}", frame, frames);
    }
    if frames > 0 {
        out.line(format!("  {:5}/{} iterations", frames, frames));
        show_display(&display, out);
    }
    Ok(())
}
