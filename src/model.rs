//! Laminate model - materials, layup, load cases and geometry

use std::path::Path;

use log::{debug, log, warn, Level};
use serde::{Deserialize, Serialize};

use crate::analysis::{ply_strains, ply_stresses, AnalysisOptions};
use crate::buckling::{
    cylinder_bending_local_buckling, cylinder_uniaxial_local_buckling, plate_shear_local_buckling,
    plate_uniaxial_local_buckling,
};
use crate::elements::{Laminate, Material};
use crate::error::{CltError, CltResult};
use crate::failure::evaluate_with_interaction;
use crate::loads::LoadCase;
use crate::math::{AbdMatrix, Mat3, Vec6};
use crate::results::{BucklingResults, LaminateResults, LoadCaseResult, PlyResult};

/// Structure the laminate is checked for local buckling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Long, simply supported flat panel of the given width
    FlatPanel { width: f64 },
    /// Infinitely long cylinder of the given radius
    Cylinder { radius: f64 },
}

/// A laminate with its materials and the load cases to check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaminateModel {
    /// Materials, indexed by the laminate's material ids
    pub materials: Vec<Material>,
    pub laminate: Laminate,
    #[serde(default)]
    pub load_cases: Vec<LoadCase>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl LaminateModel {
    /// Create a model, checking that every material id in the layup exists
    pub fn new(materials: Vec<Material>, laminate: Laminate) -> CltResult<Self> {
        laminate.check_materials(materials.len())?;
        Ok(Self {
            materials,
            laminate,
            load_cases: Vec::new(),
            geometry: None,
        })
    }

    /// Parse and validate a model from JSON
    pub fn from_json(json: &str) -> CltResult<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Read a JSON model file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CltResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> CltResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the structure used for buckling checks
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Add a load case; names must be unique
    pub fn add_load_case(&mut self, case: LoadCase) -> CltResult<()> {
        if self.load_cases.iter().any(|c| c.name == case.name) {
            return Err(CltError::DuplicateName(case.name));
        }
        self.load_cases.push(case);
        Ok(())
    }

    pub fn load_case(&self, name: &str) -> CltResult<&LoadCase> {
        self.load_cases
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CltError::LoadCaseNotFound(name.to_string()))
    }

    pub fn load_case_names(&self) -> Vec<String> {
        self.load_cases.iter().map(|c| c.name.clone()).collect()
    }

    /// Check material references and load case names
    pub fn validate(&self) -> CltResult<()> {
        self.laminate.check_materials(self.materials.len())?;
        for (i, case) in self.load_cases.iter().enumerate() {
            if self.load_cases[..i].iter().any(|c| c.name == case.name) {
                return Err(CltError::DuplicateName(case.name.clone()));
            }
        }
        Ok(())
    }

    /// Laminate stiffness of the model
    pub fn abd(&self) -> CltResult<AbdMatrix> {
        AbdMatrix::from_materials(&self.laminate, &self.materials)
    }

    // ========================
    // Analysis
    // ========================

    /// Run the stiffness, ply failure and buckling analysis
    pub fn analyze(&self, options: &AnalysisOptions) -> CltResult<LaminateResults> {
        self.validate()?;
        let level = if options.log { Level::Info } else { Level::Debug };

        log!(
            level,
            "Analyzing {} lamina groups ({} plies), {} load cases, theory {}",
            self.laminate.len(),
            self.laminate.ply_count(),
            self.load_cases.len(),
            options.failure_theory
        );

        let abd = self.abd()?;
        let compliance = abd.compliance().map_err(|e| {
            warn!("Laminate stiffness matrix is singular");
            e
        })?;

        let thickness = self.laminate.thickness();
        let properties = compliance.effective_properties(thickness)?;
        let uncoupled = abd.is_uncoupled(options.coupling_tolerance);
        log!(
            level,
            "h = {:.4e} m, Ex = {:.4e}, Ey = {:.4e}, Gxy = {:.4e}, uncoupled = {}",
            thickness,
            properties.ex,
            properties.ey,
            properties.gxy,
            uncoupled
        );

        let buckling = match self.geometry {
            Some(geometry) => {
                if !uncoupled {
                    warn!("Buckling estimates assume a symmetric laminate but B is not negligible");
                }
                Some(buckling_loads(&abd, geometry, thickness, options)?)
            }
            None => None,
        };

        let q: Vec<Mat3> = self.materials.iter().map(Material::q).collect();
        let load_cases = self
            .load_cases
            .iter()
            .map(|case| self.analyze_case(case, &abd, &q, buckling.as_ref(), options))
            .collect::<CltResult<Vec<_>>>()?;

        Ok(LaminateResults {
            abd,
            compliance,
            properties,
            thickness,
            areal_density: self.laminate.areal_density(&self.materials)?,
            uncoupled,
            load_cases,
            buckling,
        })
    }

    fn analyze_case(
        &self,
        case: &LoadCase,
        abd: &AbdMatrix,
        q: &[Mat3],
        buckling: Option<&BucklingResults>,
        options: &AnalysisOptions,
    ) -> CltResult<LoadCaseResult> {
        let strain = case.resultant.strain(abd)?;
        let loads = case.resultant.loads(abd);

        let strains = ply_strains(&self.laminate, &strain);
        let stresses = ply_stresses(&strains, q, &self.laminate)?;

        let mut plies = Vec::with_capacity(self.laminate.len());
        for (i, ((group, z), (eps, sigma))) in self
            .laminate
            .groups()
            .iter()
            .zip(self.laminate.lamina_midplanes())
            .zip(strains.iter().zip(&stresses))
            .enumerate()
        {
            let failure = evaluate_with_interaction(
                sigma,
                &self.materials[group.material].strengths(),
                options.failure_theory,
                options.tsai_wu_interaction,
            )?;

            if failure.is_failed() {
                warn!(
                    "Load case '{}': ply group {} ({} deg) fails in {} (index {:.3})",
                    case.name,
                    i,
                    group.angle,
                    failure.critical_mode(),
                    failure.failure_index()
                );
            }

            plies.push(PlyResult::new(i, group.material, group.angle, z, eps, sigma, failure));
        }

        let (critical_ply, min_safety_factor) = plies
            .iter()
            .map(|p| (p.group, p.failure.safety_factor()))
            .fold((0, f64::INFINITY), |best, (i, sf)| if sf < best.1 { (i, sf) } else { best });

        let resultant_loads = to_array(&loads);
        let buckling_margin = buckling.and_then(|b| b.margin(&resultant_loads));

        debug!(
            "Load case '{}': min safety factor {:.4} in ply group {}",
            case.name, min_safety_factor, critical_ply
        );

        Ok(LoadCaseResult {
            name: case.name.clone(),
            resultant_strain: to_array(&strain),
            resultant_loads,
            plies,
            critical_ply,
            min_safety_factor,
            buckling_margin,
        })
    }
}

fn buckling_loads(
    abd: &AbdMatrix,
    geometry: Geometry,
    thickness: f64,
    options: &AnalysisOptions,
) -> CltResult<BucklingResults> {
    match geometry {
        Geometry::FlatPanel { width } => Ok(BucklingResults::FlatPanel {
            uniaxial: plate_uniaxial_local_buckling(&abd.a, &abd.d, width)?,
            shear: plate_shear_local_buckling(&abd.a, &abd.d, width)?,
        }),
        Geometry::Cylinder { radius } => Ok(BucklingResults::Cylinder {
            uniaxial: cylinder_uniaxial_local_buckling(
                &abd.a,
                &abd.d,
                radius,
                thickness,
                options.cylinder_correlation,
            )?,
            bending: cylinder_bending_local_buckling(&abd.a, &abd.d, radius, thickness)?,
        }),
    }
}

fn to_array(v: &Vec6) -> [f64; 6] {
    [v[0], v[1], v[2], v[3], v[4], v[5]]
}
