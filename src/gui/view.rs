use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector3};
use rand::Rng;

use super::camera::ViewportCamera;
use super::starfield::Starfield;
use crate::clock::SimClock;
use crate::consts::*;
use crate::model::motion::{self, SpinState};
use crate::model::{CelestialBody, SolarSystem};
use crate::texture::{self, TextureError};

/// Scene-graph handles for one planet. The group is the handle that orbits
/// and spins; ring and moon ride along as children, exactly when the catalog
/// says the body has them.
struct PlanetNodes {
    group: SceneNode,
    ring: Option<SceneNode>,
    moon: Option<SceneNode>,
}

pub struct View<C: SimClock> {
    clock: C,
    // Object state
    bodies: Vec<CelestialBody>,
    planets: Vec<PlanetNodes>,
    sun: SceneNode,
    glow: SceneNode,
    station: SceneNode,
    nebula: SceneNode,
    spins: SpinState,
    // Camera and backdrop
    camera: ViewportCamera,
    starfield: Starfield,
}

impl<C: SimClock> View<C> {
    pub fn new<R: Rng>(
        system: SolarSystem,
        window: &mut Window,
        clock: C,
        rng: &mut R,
    ) -> Result<Self, TextureError> {
        let camera = ViewportCamera::new(
            Point3::new(0.0, 30.0, 70.0),
            window.width(),
            window.height(),
        );
        let starfield = Starfield::generate(rng, STAR_COUNT, STAR_SPREAD);

        let nebula = create_nebula(window, rng)?;
        let (sun, glow) = create_sun(window, rng)?;
        let mut planets = vec![];
        for body in &system.bodies {
            planets.push(create_planet(window, body, rng)?);
        }
        let station = create_station(window)?;

        let spins = SpinState::new(system.bodies.len());
        let mut view = View {
            clock,
            bodies: system.bodies,
            planets,
            sun,
            glow,
            station,
            nebula,
            spins,
            camera,
            starfield,
        };

        // Put everything in its starting place before the first frame
        view.update();
        Ok(view)
    }

    /// The per-frame animation step: advance the spin accumulators, then
    /// recompute every transform from the current clock reading.
    pub fn update(&mut self) {
        let now = self.clock.now_ms();
        self.spins.advance();

        for (i, (body, nodes)) in self.bodies.iter().zip(self.planets.iter_mut()).enumerate() {
            let position = motion::orbit_position(now, body.orbital_speed, body.orbital_distance);
            nodes.group.set_local_translation(Translation3::from(position));
            nodes.group.set_local_rotation(UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                self.spins.planets[i],
            ));

            if let Some(ring) = nodes.ring.as_mut() {
                ring.set_local_rotation(UnitQuaternion::from_axis_angle(
                    &Vector3::y_axis(),
                    self.spins.rings[i],
                ));
            }
            if let Some(moon) = nodes.moon.as_mut() {
                let orbit =
                    motion::orbit_position(now, MOON_ORBIT_SPEED, body.radius * MOON_ORBIT_SCALE);
                moon.set_local_translation(Translation3::from(orbit));
            }
        }

        self.sun.set_local_rotation(UnitQuaternion::from_axis_angle(
            &Vector3::y_axis(),
            self.spins.sun,
        ));
        let scale = motion::pulse_scale(now, GLOW_PULSE_SPEED, GLOW_PULSE_AMPLITUDE);
        self.glow.set_local_scale(scale, scale, scale);

        let mut station_position =
            motion::orbit_position(now, STATION_ORBIT_SPEED, STATION_ORBIT_RADIUS);
        station_position.y = motion::bob_height(now, STATION_BOB_SPEED, STATION_BOB_AMPLITUDE);
        self.station
            .set_local_translation(Translation3::from(station_position));
        self.station
            .set_local_rotation(UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                self.spins.station,
            ));

        let (tilt_x, tilt_y) = motion::nebula_tilt(self.spins.nebula_phase);
        self.nebula
            .set_local_rotation(UnitQuaternion::from_euler_angles(tilt_x, tilt_y, 0.0));

        self.starfield.set_angle(self.spins.stars);
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (
            Some(&mut self.camera),
            None,
            Some(&mut self.starfield),
            None,
        )
    }
}

fn create_sun<R: Rng>(
    window: &mut Window,
    rng: &mut R,
) -> Result<(SceneNode, SceneNode), TextureError> {
    let mut sun = window.add_group();
    let mut surface = sun.add_sphere(SUN_RADIUS);
    surface.set_texture_from_memory(&texture::sun(rng).encode_png()?, "sun");

    // The radiation shell would hide the sun if drawn solid, so render it as
    // a wireframe cage instead.
    let mut glow = sun.add_group();
    let mut shell = glow.add_sphere(GLOW_RADIUS);
    shell.set_color(1.0, 1.0, 0.2);
    shell.set_surface_rendering_activation(false);
    shell.set_lines_width(1.0);

    Ok((sun, glow))
}

fn create_planet<R: Rng>(
    window: &mut Window,
    body: &CelestialBody,
    rng: &mut R,
) -> Result<PlanetNodes, TextureError> {
    let name = body.name.to_lowercase();

    let mut group = window.add_group();
    let mut sphere = group.add_sphere(body.radius);
    sphere.set_texture_from_memory(
        &texture::planet(rng, body.base_color, body.detail_color).encode_png()?,
        &format!("planet-{}", name),
    );
    group.set_local_translation(Translation3::new(body.orbital_distance, 0.0, 0.0));

    let ring = match body.ring_color {
        Some(color) => {
            let mesh = ring_mesh(
                body.radius * RING_INNER_SCALE,
                body.radius * RING_OUTER_SCALE,
                RING_SEGMENTS,
            );
            let mut ring = group.add_mesh(Rc::new(RefCell::new(mesh)), Vector3::new(1.0, 1.0, 1.0));
            ring.set_texture_from_memory(
                &texture::ring(rng, color).encode_png()?,
                &format!("ring-{}", name),
            );
            ring.enable_backface_culling(false);
            Some(ring)
        }
        None => None,
    };

    let moon = if body.has_moon {
        let mut moon = group.add_sphere(MOON_RADIUS);
        moon.set_texture_from_memory(
            &texture::planet(rng, texture::rgb(192, 192, 192), texture::rgb(128, 128, 128))
                .encode_png()?,
            &format!("moon-{}", name),
        );
        moon.set_local_translation(Translation3::new(body.radius * MOON_ORBIT_SCALE, 0.0, 0.0));
        Some(moon)
    } else {
        None
    };

    Ok(PlanetNodes { group, ring, moon })
}

fn create_station(window: &mut Window) -> Result<SceneNode, TextureError> {
    let mut station = window.add_group();
    let mut hull = station.add_cylinder(1.0, 5.0);
    hull.set_color(0.75, 0.75, 0.75);

    let panel_png = texture::solar_panel().encode_png()?;
    for side in &[-1.0f32, 1.0] {
        let mut panel = station.add_cube(6.0, 0.1, 2.0);
        panel.set_local_translation(Translation3::new(4.0 * side, 0.0, 0.0));
        panel.set_texture_from_memory(&panel_png, "solar-panel");
    }

    Ok(station)
}

fn create_nebula<R: Rng>(window: &mut Window, rng: &mut R) -> Result<SceneNode, TextureError> {
    let mut nebula = window.add_sphere(NEBULA_RADIUS);
    nebula.set_texture_from_memory(&texture::nebula(rng).encode_png()?, "nebula");
    // We sit inside this sphere, so don't cull its inward faces
    nebula.enable_backface_culling(false);
    Ok(nebula)
}

/// Flat annulus in the xz-plane, u running from the inner edge to the outer.
fn ring_mesh(inner: f32, outer: f32, segments: u16) -> Mesh {
    let count = segments as usize + 1;
    let mut coords = Vec::with_capacity(2 * count);
    let mut normals = Vec::with_capacity(2 * count);
    let mut uvs = Vec::with_capacity(2 * count);
    let mut faces = Vec::with_capacity(2 * segments as usize);

    for s in 0..=segments {
        let frac = s as f32 / segments as f32;
        let (sin, cos) = (frac * TAU).sin_cos();
        coords.push(Point3::new(inner * cos, 0.0, inner * sin));
        coords.push(Point3::new(outer * cos, 0.0, outer * sin));
        normals.push(Vector3::y());
        normals.push(Vector3::y());
        uvs.push(Point2::new(0.0, frac));
        uvs.push(Point2::new(1.0, frac));
    }

    for s in 0..segments {
        let base = 2 * s;
        faces.push(Point3::new(base, base + 1, base + 2));
        faces.push(Point3::new(base + 1, base + 3, base + 2));
    }

    Mesh::new(coords, faces, Some(normals), Some(uvs), false)
}
