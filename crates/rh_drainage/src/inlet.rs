// crates/rh_drainage/src/inlet.rs

//! 雨水口数据模型
//!
//! 雨水口分两种工况，各自的权威字段不同：
//!
//! - **低点（凹形竖曲线底部）**：截流量与积水宽度由人工给定（孔口/堰流图表），
//!   不使用连续坡段的边沟公式；
//! - **连续坡段**：积水宽度由边沟公式计算，截流量 = 总流量 × 截流比。
//!
//! 两种工况用 [`InletMode`] 标签枚举表达，非法组合不可表示。
//! 引擎从不修改输入，派生结果写入并行的 [`InletResult`]。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 雨水口结构形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    /// 侧石开口式
    CurbOpening,
    /// 箅子式
    Grate,
    /// 联合式
    Combination,
    /// 其他
    Other,
    /// 未设置
    #[default]
    Unset,
}

impl StructureType {
    /// 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::CurbOpening => "Curb Opening",
            Self::Grate => "Grate",
            Self::Combination => "Combination",
            Self::Other => "Other",
            Self::Unset => "-",
        }
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 雨水口工况
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InletMode {
    /// 低点：截流量与积水宽度为人工输入
    LowPoint {
        /// 人工截流量 [cfs]，未设置按 0
        #[serde(default)]
        manual_intercepted_flow: Option<f64>,
        /// 人工积水宽度 [ft]，未设置按 0
        #[serde(default)]
        manual_flooding_width: Option<f64>,
    },
    /// 连续坡段：由截流比计算截流量
    OnGrade {
        /// 截流比 [0, 1]，未设置按 0
        #[serde(default)]
        interception_ratio: Option<f64>,
    },
}

impl InletMode {
    /// 连续坡段工况
    pub fn on_grade(interception_ratio: f64) -> Self {
        Self::OnGrade {
            interception_ratio: Some(interception_ratio),
        }
    }

    /// 低点工况
    pub fn low_point(manual_intercepted_flow: f64, manual_flooding_width: f64) -> Self {
        Self::LowPoint {
            manual_intercepted_flow: Some(manual_intercepted_flow),
            manual_flooding_width: Some(manual_flooding_width),
        }
    }

    /// 是否为低点
    pub fn is_low_point(&self) -> bool {
        matches!(self, Self::LowPoint { .. })
    }
}

impl Default for InletMode {
    fn default() -> Self {
        Self::OnGrade {
            interception_ratio: None,
        }
    }
}

/// 雨水口输入记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inlet {
    /// 雨水口编号
    pub str_id: String,
    /// 结构形式
    #[serde(default)]
    pub structure_type: StructureType,
    /// 桩号 [ft]
    #[serde(default)]
    pub station: f64,
    /// 直接汇水 ΣAC [acre]
    #[serde(default)]
    pub area_times_c: f64,
    /// 径流系数 C
    #[serde(default)]
    pub runoff_coefficient: f64,
    /// 最长流径 HL [ft]
    #[serde(default)]
    pub longest_flow_path: f64,
    /// 流径坡度 [%]
    #[serde(default)]
    pub flow_path_slope: f64,
    /// 边沟纵坡 [%]
    #[serde(default)]
    pub gutter_grade: f64,
    /// 工况
    #[serde(default)]
    pub mode: InletMode,
}

impl Inlet {
    /// 创建连续坡段雨水口，数值字段全部为 0
    pub fn new(str_id: impl Into<String>) -> Self {
        Self {
            str_id: str_id.into(),
            structure_type: StructureType::Unset,
            station: 0.0,
            area_times_c: 0.0,
            runoff_coefficient: 0.0,
            longest_flow_path: 0.0,
            flow_path_slope: 0.0,
            gutter_grade: 0.0,
            mode: InletMode::default(),
        }
    }

    /// 设置结构形式
    pub fn with_structure(mut self, structure_type: StructureType) -> Self {
        self.structure_type = structure_type;
        self
    }

    /// 设置桩号
    pub fn with_station(mut self, station: f64) -> Self {
        self.station = station;
        self
    }

    /// 设置汇水参数
    pub fn with_drainage(
        mut self,
        area_times_c: f64,
        runoff_coefficient: f64,
        longest_flow_path: f64,
        flow_path_slope: f64,
    ) -> Self {
        self.area_times_c = area_times_c;
        self.runoff_coefficient = runoff_coefficient;
        self.longest_flow_path = longest_flow_path;
        self.flow_path_slope = flow_path_slope;
        self
    }

    /// 设置边沟纵坡
    pub fn with_gutter_grade(mut self, gutter_grade: f64) -> Self {
        self.gutter_grade = gutter_grade;
        self
    }

    /// 设置工况
    pub fn with_mode(mut self, mode: InletMode) -> Self {
        self.mode = mode;
        self
    }

    /// 是否为低点
    pub fn is_low_point(&self) -> bool {
        self.mode.is_low_point()
    }

    /// 切换低点/连续坡段
    ///
    /// 工况改变时新工况的字段全部为未设置；工况未变则保持原值。
    pub fn set_low_point(&mut self, low_point: bool) {
        if low_point == self.is_low_point() {
            return;
        }
        self.mode = if low_point {
            InletMode::LowPoint {
                manual_intercepted_flow: None,
                manual_flooding_width: None,
            }
        } else {
            InletMode::OnGrade {
                interception_ratio: None,
            }
        };
    }
}

/// 雨水口计算结果
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InletResult {
    /// 汇流时间 [min]（0 表示不可计算）
    pub time_of_concentration: f64,
    /// 降雨强度 [in/hr]
    pub intensity: f64,
    /// 直接汇水流量 [cfs]
    pub q_from_area: f64,
    /// 上游旁通来流 [cfs]
    pub q_bypass_in: f64,
    /// 总流量 [cfs]
    pub q_total: f64,
    /// 截流量 qi [cfs]
    pub intercepted_flow: f64,
    /// 旁通至下游的流量 [cfs]
    pub q_bypass_out: f64,
    /// 积水宽度 [ft]
    pub flooding_width: f64,
}
