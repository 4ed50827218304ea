// crates/rh_report/src/project.rs

//! 设计项目文件
//!
//! 一个 JSON 文件保存完整的设计输入：配置、降雨选择、纵断面和雨水口序列。
//! 派生结果从不落盘，每次通过 [`DesignProject::recompute`] 重新得到。

use crate::report::{DesignReport, ReportAssembler};
use rh_config::DesignConfig;
use rh_drainage::{evaluate_cascade, validate_inlets, CascadeContext, Inlet, InletResult, RainfallSelection};
use rh_foundation::{RhError, RhResult, ValidationError, ValidationReport};
use rh_profile::{ProfileDefinition, ProfileDerived, ProfileEngine};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 设计项目
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignProject {
    /// 设计配置
    #[serde(default)]
    pub config: DesignConfig,
    /// 降雨选择
    #[serde(default)]
    pub selection: RainfallSelection,
    /// 纵断面定义
    #[serde(default)]
    pub profile: ProfileDefinition,
    /// 雨水口序列（顺序即级联顺序）
    #[serde(default)]
    pub inlets: Vec<Inlet>,
}

/// 一次完整重算的结果
#[derive(Debug, Clone, PartialEq)]
pub struct DesignOutcome {
    /// 纵断面派生结果
    pub profile: ProfileDerived,
    /// 每个雨水口的结果
    pub results: Vec<InletResult>,
    /// 汇总报告
    pub report: DesignReport,
}

impl DesignProject {
    /// 从文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> RhResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RhError::io(path, e))?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析，并校验其中的配置
    pub fn from_json(content: &str) -> RhResult<Self> {
        let project: DesignProject =
            serde_json::from_str(content).map_err(|e| RhError::serialization(e.to_string()))?;
        project.config.validate()?;
        Ok(project)
    }

    /// 序列化为格式化 JSON
    pub fn to_json(&self) -> RhResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RhError::serialization(e.to_string()))
    }

    /// 保存到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> RhResult<()> {
        let path = path.as_ref();
        let content = self.to_json()?;
        std::fs::write(path, content).map_err(|e| RhError::io(path, e))
    }

    /// 级联上下文
    pub fn cascade_context(&self) -> CascadeContext {
        CascadeContext::from_config(self.selection, &self.config.hydraulics)
    }

    /// 只重算级联
    pub fn evaluate_inlets(&self) -> Vec<InletResult> {
        evaluate_cascade(&self.inlets, &self.cascade_context())
    }

    /// 完整重算：纵断面 + 级联 + 报告
    pub fn recompute(&self) -> RhResult<DesignOutcome> {
        let profile = ProfileEngine::new(self.config.profile.clone()).recompute(&self.profile)?;
        let results = self.evaluate_inlets();
        let report = ReportAssembler::assemble(&profile, &self.inlets, &results, &self.selection)?;
        log::debug!(
            "项目重算完成: {} 个变坡点, {} 个雨水口",
            self.profile.len(),
            self.inlets.len()
        );
        Ok(DesignOutcome {
            profile,
            results,
            report,
        })
    }

    /// 验证全部输入
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Err(e) = self.config.validate() {
            report.add_error(ValidationError::ConsistencyError {
                message: e.to_string(),
            });
        }
        report.merge(ProfileEngine::new(self.config.profile.clone()).validate(&self.profile));
        report.merge(validate_inlets(&self.inlets));
        report
    }

    // =========================================================================
    // 雨水口编辑
    // =========================================================================

    /// 追加到末尾
    pub fn add_inlet(&mut self, inlet: Inlet) {
        self.inlets.push(inlet);
    }

    /// 插入到指定位置
    pub fn insert_inlet(&mut self, index: usize, inlet: Inlet) -> RhResult<()> {
        if index > self.inlets.len() {
            return Err(RhError::index_out_of_bounds("inlet", index, self.inlets.len()));
        }
        self.inlets.insert(index, inlet);
        Ok(())
    }

    /// 删除
    pub fn remove_inlet(&mut self, index: usize) -> RhResult<Inlet> {
        self.check_inlet_index(index)?;
        Ok(self.inlets.remove(index))
    }

    /// 移动到新位置，其余雨水口保持相对顺序
    pub fn move_inlet(&mut self, from: usize, to: usize) -> RhResult<()> {
        self.check_inlet_index(from)?;
        self.check_inlet_index(to)?;
        let inlet = self.inlets.remove(from);
        self.inlets.insert(to, inlet);
        Ok(())
    }

    /// 交换两个雨水口
    pub fn swap_inlets(&mut self, a: usize, b: usize) -> RhResult<()> {
        self.check_inlet_index(a)?;
        self.check_inlet_index(b)?;
        self.inlets.swap(a, b);
        Ok(())
    }

    /// 可变访问
    pub fn inlet_mut(&mut self, index: usize) -> Option<&mut Inlet> {
        self.inlets.get_mut(index)
    }

    fn check_inlet_index(&self, index: usize) -> RhResult<()> {
        if index >= self.inlets.len() {
            return Err(RhError::index_out_of_bounds("inlet", index, self.inlets.len()));
        }
        Ok(())
    }
}
