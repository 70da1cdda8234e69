use std::time::Instant;

use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{Color32, ColorImage, TextureHandle, epaint::Mesh, pos2};
use geoscape::export::{DEFAULT_LIGHT, render_world};
use geoscape::{BiomeMap, Bounds, GeneratorConfig, World};
use glam::Vec3;
use image::RgbImage;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum MapSource {
    #[default]
    LandAndWater,
    Classifier,
    Land,
    Water,
}

struct GeoscapeApp {
    // parameters
    map_source: MapSource,
    resolution: usize,
    noise_resolution: usize,
    seed: u64,
    base_elevation: f32,
    blend_tolerance: f32,
    alias_distance: usize,
    animate: bool,

    // generated world and its top-down render
    world: Option<World>,
    terrain_texture: Option<TextureHandle>,
    last_image: Option<RgbImage>,

    // status
    status_message: String,
}

impl Default for GeoscapeApp {
    fn default() -> Self {
        let config = GeneratorConfig::default();
        Self {
            map_source: MapSource::LandAndWater,
            resolution: config.rows,
            noise_resolution: config.noise_rows,
            seed: config.seed,
            base_elevation: config.base_elevation,
            blend_tolerance: config.blend_tolerance,
            alias_distance: config.alias_distance,
            animate: false,
            world: None,
            terrain_texture: None,
            last_image: None,
            status_message: String::new(),
        }
    }
}

impl GeoscapeApp {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            rows: self.resolution,
            cols: self.resolution,
            bounds: Bounds::default(),
            noise_rows: self.noise_resolution,
            noise_cols: self.noise_resolution,
            base_elevation: self.base_elevation,
            blend_tolerance: self.blend_tolerance,
            alias_distance: self.alias_distance,
            seed: self.seed,
        }
    }

    fn build_world(&self) -> geoscape::Result<World> {
        let config = self.config();
        let map = match self.map_source {
            MapSource::LandAndWater => {
                let water_size = (config.rows / 2).max(2);
                return World::land_and_water(config.rows, water_size, config.seed);
            }
            MapSource::Classifier => None,
            MapSource::Land => Some(BiomeMap::land(config.rows, config.cols)?),
            MapSource::Water => Some(BiomeMap::water(config.rows, config.cols)?),
        };

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new(format!("{:?}", self.map_source), config.bounds);
        world.generate_layer("Terrain", &config, map.as_ref(), &mut rng)?;
        Ok(world)
    }

    fn generate(&mut self, ctx: &egui::Context) {
        let start = Instant::now();
        match self.build_world() {
            Ok(world) => {
                let img = render_world(&world, DEFAULT_LIGHT);
                let size = [img.width() as usize, img.height() as usize];
                let color_image = ColorImage::from_rgb(size, img.as_raw());
                self.terrain_texture =
                    Some(ctx.load_texture("terrain", color_image, egui::TextureOptions::NEAREST));
                self.last_image = Some(img);
                let elapsed = start.elapsed().as_secs_f32() * 1000.0;
                self.status_message = format!("Generated {} in {:.2} ms", world, elapsed);
                self.world = Some(world);
            }
            Err(err) => {
                error!("Generation failed: {}", err);
                self.status_message = format!("Generation failed: {}", err);
            }
        }
        ctx.request_repaint();
    }

    fn save(&mut self) {
        let Some(img) = &self.last_image else {
            self.status_message = "Nothing to save yet".into();
            return;
        };
        let picked = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(format!("geoscape_{}.png", self.seed))
            .save_file();
        let Some(path) = picked else {
            return;
        };
        self.status_message = match img.save(&path) {
            Ok(()) => {
                info!("Saved top-down render to {:?}", path);
                format!("Saved {}", path.display())
            }
            Err(err) => {
                error!("Failed to save {:?}: {}", path, err);
                format!("Save failed: {}", err)
            }
        };
    }
}

// Oblique side view of every layer; triangles are sorted by centroid so the
// far side is drawn first and water covers the land beneath it
fn paint_mesh(ui: &mut egui::Ui, world: &World) {
    let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
    let bounds = world.bounds();
    let hscale = rect.height() * 0.5;
    let light = DEFAULT_LIGHT.normalize();

    let project = |p: Vec3| {
        let u = (p.x - bounds.min_x) / bounds.width();
        let v = (p.y - bounds.min_y) / bounds.height();
        pos2(
            rect.left() + u * rect.width(),
            rect.top() + rect.height() * (0.35 + 0.6 * v) - p.z * hscale,
        )
    };

    let mut faces: Vec<_> = world
        .layers()
        .iter()
        .flat_map(|layer| {
            let grid = &layer.grid;
            grid.triangles()
                .iter()
                .map(move |triangle| (triangle.centroid(grid.points()), grid, triangle))
        })
        .collect();
    faces.sort_by(|(a, ..), (b, ..)| a.y.total_cmp(&b.y).then(a.z.total_cmp(&b.z)));

    let mut mesh = Mesh::default();
    for (_, grid, triangle) in faces {
        let light_scale = triangle.normal(grid.points()).dot(light).max(0.0) * 0.6 + 0.4;
        let [r, g, b] = triangle.shade(light_scale).to_rgb8();
        let colour = Color32::from_rgb(r, g, b);

        let base = mesh.vertices.len() as u32;
        for point in grid.triangle_points(triangle) {
            mesh.colored_vertex(project(point.render_position()), colour);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    ui.painter().add(egui::Shape::mesh(mesh));
}

impl App for GeoscapeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Geoscape");
            ui.separator();

            ui.label("Biomes");
            egui::ComboBox::from_label("Biome source")
                .selected_text(format!("{:?}", self.map_source))
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.map_source,
                        MapSource::LandAndWater,
                        "Land + water",
                    );
                    ui.selectable_value(&mut self.map_source, MapSource::Classifier, "Classifier");
                    ui.selectable_value(&mut self.map_source, MapSource::Land, "Land map");
                    ui.selectable_value(&mut self.map_source, MapSource::Water, "Water map");
                });

            ui.label("Grid resolution");
            ui.add(egui::Slider::new(&mut self.resolution, 10..=300));
            ui.label("Noise resolution");
            ui.add(egui::Slider::new(&mut self.noise_resolution, 1..=32));

            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));

            ui.label("Base elevation");
            ui.add(egui::Slider::new(&mut self.base_elevation, 0.0..=0.5));
            ui.label("Blend tolerance");
            ui.add(egui::Slider::new(&mut self.blend_tolerance, 0.0..=0.2));
            ui.label("Aliasing distance");
            ui.add(egui::Slider::new(&mut self.alias_distance, 0..=6));

            ui.checkbox(&mut self.animate, "Animate water");

            ui.separator();

            if ui.button("Generate Terrain").clicked() {
                self.generate(ctx);
            }
            if ui.button("Save PNG…").clicked() {
                self.save();
            }

            ui.separator();
            ui.label(&self.status_message);
        });

        if self.animate {
            if let Some(world) = &mut self.world {
                world.animate(ctx.input(|i| i.time));
                ctx.request_repaint();
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| match (&self.terrain_texture, &self.world) {
            (Some(tex), Some(world)) => {
                let side = ui.available_height().min(ui.available_width()) * 0.5;
                ui.image((tex.id(), egui::vec2(side, side)));
                ui.separator();
                ui.label("Side view:");
                paint_mesh(ui, world);
            }
            _ => {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate Terrain” to start");
                });
            }
        });
    }
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting Geoscape viewer");

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "Geoscape",
        opts,
        Box::new(|_cc| Ok(Box::new(GeoscapeApp::default()))),
    )
}
