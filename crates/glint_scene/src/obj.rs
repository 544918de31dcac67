//! Wavefront OBJ/MTL import and export.
//!
//! Import goes through `tobj`: every object in the file is merged into one
//! generic model whose material slots follow the file's `usemtl` groups.
//! Export writes three fresh vertices per triangle, so the output never
//! shares vertices between faces.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glint_math::Point;

use crate::material::{AMBIENT_STRENGTH, SPECULAR_EXPONENT};
use crate::model::MAX_MATERIALS;
use crate::{Color, Material, Model, SceneError, SceneResult, Triangle};

/// Load an OBJ file (and the MTL files it references) as a single model.
pub fn load_obj<P: AsRef<Path>>(path: P) -> SceneResult<Model> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;

    let obj_materials = match materials {
        Ok(materials) => materials,
        Err(e) => {
            log::warn!("Ignoring materials of {}: {}", path.display(), e);
            Vec::new()
        }
    };

    if obj_materials.len() > MAX_MATERIALS {
        return Err(SceneError::TooManyMaterials(obj_materials.len()));
    }

    let mut materials: Vec<Material> = obj_materials.iter().map(convert_material).collect();
    let mut default_slot: Option<u8> = None;
    let mut triangles = Vec::new();
    let mut skipped = 0usize;

    for model in &models {
        let mesh = &model.mesh;
        let slot = match mesh.material_id {
            Some(id) if id < materials.len() && id < obj_materials.len() => id as u8,
            other => {
                if let Some(id) = other {
                    log::warn!("Object '{}' references missing material {}", model.name, id);
                }
                match default_slot {
                    Some(slot) => slot,
                    None => {
                        if materials.len() >= MAX_MATERIALS {
                            return Err(SceneError::TooManyMaterials(materials.len() + 1));
                        }
                        let slot = materials.len() as u8;
                        materials.push(Material::default());
                        default_slot = Some(slot);
                        slot
                    }
                }
            }
        };

        let vertex = |i: u32| -> Option<Point> {
            let i = i as usize * 3;
            let p = mesh.positions.get(i..i + 3)?;
            Some(Point::new(p[0] as f64, p[1] as f64, p[2] as f64))
        };

        for face in mesh.indices.chunks(3) {
            match face {
                [a, b, c] => match (vertex(*a), vertex(*b), vertex(*c)) {
                    (Some(a), Some(b), Some(c)) => triangles.push(Triangle::new(a, b, c, slot)),
                    _ => skipped += 1,
                },
                _ => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} malformed faces in {}", skipped, path.display());
    }
    if triangles.is_empty() {
        return Err(SceneError::NoGeometry(path.display().to_string()));
    }

    log::debug!(
        "Loaded {}: {} objects, {} triangles, {} materials",
        path.display(),
        models.len(),
        triangles.len(),
        materials.len()
    );

    Model::from_triangles(triangles, materials)
}

/// Map an MTL material onto a glint material.
///
/// `Kd` is the diffuse color and a non-black `Ks` turns the highlight on.
/// `Ka` (as its mean), `Ks` and `Ns` are kept on the material but do not
/// change shading. A non-positive `Ns` falls back to [`SPECULAR_EXPONENT`].
fn convert_material(m: &tobj::Material) -> Material {
    let rgb = |c: [f32; 3]| Color::from_rgb(c[0] as f64, c[1] as f64, c[2] as f64);

    let mut material = Material::diffuse(m.diffuse.map(rgb).unwrap_or(Color::WHITE));
    if let Some(ka) = m.ambient {
        material.ambient = (ka[0] + ka[1] + ka[2]) as f64 / 3.0;
    }
    if let Some(ks) = m.specular.map(rgb) {
        material.specular = ks;
        material.shininess = if ks == Color::BLACK { 0.0 } else { 1.0 };
    }
    material.specular_exponent = match m.shininess {
        Some(ns) if ns > 0.0 => ns as f64,
        _ => SPECULAR_EXPONENT,
    };
    material
}

fn material_name(model: usize, slot: usize) -> String {
    format!("glint_{}_{}", model, slot)
}

fn write_faces<W: Write>(
    models: &[&Model],
    writer: &mut W,
    mtllib: Option<&str>,
) -> SceneResult<()> {
    writeln!(writer, "# glint export")?;
    if let Some(lib) = mtllib {
        writeln!(writer, "mtllib {}", lib)?;
    }

    let mut next_vertex = 1usize;
    for (m, model) in models.iter().enumerate() {
        writeln!(writer, "o model_{}", m)?;

        let mut current: Option<u8> = None;
        for t in model.triangles() {
            if current != Some(t.material) {
                writeln!(writer, "usemtl {}", material_name(m, t.material as usize))?;
                current = Some(t.material);
            }
            for v in t.vertices() {
                writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
            }
            writeln!(
                writer,
                "f {} {} {}",
                next_vertex,
                next_vertex + 1,
                next_vertex + 2
            )?;
            next_vertex += 3;
        }
    }
    Ok(())
}

/// Write models as OBJ geometry with `usemtl` groups and no `mtllib` line.
pub fn write_obj<W: Write>(models: &[&Model], writer: &mut W) -> SceneResult<()> {
    write_faces(models, writer, None)
}

/// Write the materials of `models` as an MTL library.
pub fn write_mtl<W: Write>(models: &[&Model], writer: &mut W) -> SceneResult<()> {
    writeln!(writer, "# glint export")?;
    for (m, model) in models.iter().enumerate() {
        for (slot, material) in model.materials().iter().enumerate() {
            let [dr, dg, db] = material.diffuse.to_rgb();
            let [sr, sg, sb] = material.specular.scale(material.shininess).to_rgb();
            writeln!(writer, "newmtl {}", material_name(m, slot))?;
            writeln!(writer, "Kd {:.6} {:.6} {:.6}", dr, dg, db)?;
            writeln!(writer, "Ks {:.6} {:.6} {:.6}", sr, sg, sb)?;
            writeln!(writer, "Ns {:.6}", material.specular_exponent)?;
            if material.ambient != AMBIENT_STRENGTH {
                let a = material.ambient;
                writeln!(writer, "Ka {:.6} {:.6} {:.6}", a, a, a)?;
            }
        }
    }
    Ok(())
}

/// Save models to `path` plus a companion `.mtl` file next to it.
pub fn save_obj<P: AsRef<Path>>(models: &[&Model], path: P) -> SceneResult<()> {
    let path = path.as_ref();
    let mtl_path = path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            SceneError::Configuration(format!("invalid export path {}", path.display()))
        })?;

    let mut obj = BufWriter::new(File::create(path)?);
    write_faces(models, &mut obj, Some(&mtl_name))?;
    obj.flush()?;

    let mut mtl = BufWriter::new(File::create(&mtl_path)?);
    write_mtl(models, &mut mtl)?;
    mtl.flush()?;

    log::info!(
        "Exported {} models to {} and {}",
        models.len(),
        path.display(),
        mtl_path.display()
    );
    Ok(())
}
