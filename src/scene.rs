//! kiss3d presentation of a [`System`].

use kiss3d::camera::ArcBall;
use kiss3d::light::Light;
use kiss3d::nalgebra::{Point3, Translation3, Vector3};
use kiss3d::resource::TextureManager;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use log::info;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use crate::driver::Display;
use crate::error::AssetError;
use crate::system::{System, SPHERE_RADIUS, TORUS_RADIUS, TUBE_RADIUS};
use crate::torus::TorusGeometry;

const TEXTURE_NAME: &str = "particle";

/// A texture file that exists and decodes as an image.
#[derive(Debug, Clone)]
pub struct Texture {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn locate(path: &Path) -> Result<Texture, AssetError> {
        if !path.exists() {
            return Err(AssetError::Missing(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(AssetError::NotAFile(path.to_path_buf()));
        }
        // kiss3d unwraps its own decode, so a bad file must be caught here.
        let image = image::open(path).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Texture {
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Window, camera and one scene node per entity.
pub struct Scene {
    window: Window,
    camera: ArcBall,
    donut: SceneNode,
    spheres: Vec<SceneNode>,
    textured: bool,
    generation: Option<u64>,
}

impl Scene {
    pub fn new(title: &str, texture: Option<&Texture>) -> Self {
        let mut window = Window::new(title);
        window.set_light(Light::StickToCamera);
        window.set_background_color(0.0, 0.0, 0.0);

        // Registered once, shared by every sphere.
        if let Some(texture) = texture {
            TextureManager::get_global_manager(|tm| {
                tm.add(texture.path(), TEXTURE_NAME);
            });
            let (w, h) = texture.size();
            info!("loaded texture {} ({}x{})", texture.path().display(), w, h);
        }

        let geometry = TorusGeometry::new(TORUS_RADIUS, TUBE_RADIUS, 12, 48);
        let mut donut = window.add_mesh(
            Rc::new(RefCell::new(geometry.into_mesh())),
            Vector3::new(1.0, 1.0, 1.0),
        );
        donut.set_material_with_name("normals");

        let camera = ArcBall::new(Point3::new(1.0, 0.0, 3.0), Point3::origin());

        Scene {
            window,
            camera,
            donut,
            spheres: Vec::new(),
            textured: texture.is_some(),
            generation: None,
        }
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Draw the frame. Returns `false` once the window was closed.
    pub fn render(&mut self) -> bool {
        self.window.render_with_camera(&mut self.camera)
    }

    fn rebuild(&mut self, system: &System) {
        for node in self.spheres.iter_mut() {
            node.unlink();
        }
        self.spheres.clear();

        for _ in system.particles() {
            // Scaling the group keeps the sphere's own radius intact.
            let mut group = self.window.add_group();
            group.add_sphere(SPHERE_RADIUS);
            if self.textured {
                group.set_texture_with_name(TEXTURE_NAME);
            }
            self.spheres.push(group);
        }

        self.generation = Some(system.generation());
    }
}

impl Display for Scene {
    fn present(&mut self, system: &System, _now: Instant) {
        if self.generation != Some(system.generation()) {
            self.rebuild(system);
        }

        let body = system.body();
        let s = body.scale();
        self.donut.set_local_rotation(body.orientation());
        self.donut.set_local_scale(s, s, s);

        for (node, p) in self.spheres.iter_mut().zip(system.particles()) {
            let pos = p.position();
            node.set_local_translation(Translation3::new(pos.x, pos.y, pos.z));
            node.set_local_scale(p.scale(), p.scale(), p.scale());
            if p.is_flashing() {
                node.set_color(1.0, 0.0, 0.0);
            } else {
                node.set_color(1.0, 1.0, 1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn missing_texture_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Texture::locate(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, AssetError::Missing(_)));
    }

    #[test]
    fn directory_is_not_a_texture() {
        let dir = tempfile::tempdir().unwrap();
        let err = Texture::locate(dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::NotAFile(_)));
    }

    #[test]
    fn non_image_file_is_rejected() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let err = Texture::locate(&path).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn png_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("particle.png");
        RgbaImage::from_pixel(4, 2, Rgba([255, 255, 255, 255]))
            .save(&path)
            .unwrap();

        let texture = Texture::locate(&path).unwrap();
        assert_eq!(texture.size(), (4, 2));
        assert_eq!(texture.path(), path.as_path());
    }
}
