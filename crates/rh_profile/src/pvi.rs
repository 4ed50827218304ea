// crates/rh_profile/src/pvi.rs

//! 变坡点 (PVI) 与纵断面定义
//!
//! 变坡点以在序列中的位置作为隐式标识：删除一个变坡点会使其后所有索引前移。
//! 坡度以百分数表示；非有限值（JSON 中为 `null`）表示"未定义"。

use rh_foundation::{RhError, RhResult};
use serde::{Deserialize, Deserializer, Serialize};

/// 变坡点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pvi {
    /// 桩号 [ft]
    pub station: f64,
    /// 高程 [ft]
    pub elevation: f64,
    /// 竖曲线长度 [ft]，0 表示纯折线点
    #[serde(default)]
    pub curve_length: f64,
}

impl Pvi {
    /// 创建变坡点
    pub fn new(station: f64, elevation: f64, curve_length: f64) -> Self {
        Self {
            station,
            elevation,
            curve_length,
        }
    }
}

/// 纵断面定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    /// 起始坡度 [%]
    #[serde(default = "undefined_grade", deserialize_with = "nullable_grade")]
    pub beginning_grade: f64,
    /// 终止坡度 [%]
    #[serde(default = "undefined_grade", deserialize_with = "nullable_grade")]
    pub ending_grade: f64,
    /// 有序变坡点序列
    #[serde(default)]
    pub pvis: Vec<Pvi>,
}

fn undefined_grade() -> f64 {
    f64::NAN
}

fn nullable_grade<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl Default for ProfileDefinition {
    fn default() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }
}

impl ProfileDefinition {
    /// 创建不含变坡点的纵断面
    pub fn new(beginning_grade: f64, ending_grade: f64) -> Self {
        Self {
            beginning_grade,
            ending_grade,
            pvis: Vec::new(),
        }
    }

    /// 追加变坡点（链式）
    pub fn with_pvi(mut self, pvi: Pvi) -> Self {
        self.pvis.push(pvi);
        self
    }

    /// 追加变坡点
    pub fn add_pvi(&mut self, pvi: Pvi) {
        self.pvis.push(pvi);
    }

    /// 在指定位置插入变坡点
    pub fn insert_pvi(&mut self, index: usize, pvi: Pvi) -> RhResult<()> {
        if index > self.pvis.len() {
            return Err(RhError::index_out_of_bounds("pvi", index, self.pvis.len() + 1));
        }
        self.pvis.insert(index, pvi);
        Ok(())
    }

    /// 删除变坡点，其后索引前移
    pub fn remove_pvi(&mut self, index: usize) -> RhResult<Pvi> {
        if index >= self.pvis.len() {
            return Err(RhError::index_out_of_bounds("pvi", index, self.pvis.len()));
        }
        Ok(self.pvis.remove(index))
    }

    /// 可变访问变坡点
    pub fn pvi_mut(&mut self, index: usize) -> Option<&mut Pvi> {
        self.pvis.get_mut(index)
    }

    /// 变坡点数量
    pub fn len(&self) -> usize {
        self.pvis.len()
    }

    /// 是否没有变坡点
    pub fn is_empty(&self) -> bool {
        self.pvis.is_empty()
    }

    /// 检查桩号非递减
    ///
    /// 桩号相等允许（按零坡度的退化情况处理），递减视为调用方违约。
    pub fn check_station_order(&self) -> RhResult<()> {
        for (i, pair) in self.pvis.windows(2).enumerate() {
            if pair[1].station < pair[0].station {
                return Err(RhError::non_monotonic(i + 1, pair[1].station, pair[0].station));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProfileDefinition {
        ProfileDefinition::new(-1.0, 1.0)
            .with_pvi(Pvi::new(1000.0, 100.0, 200.0))
            .with_pvi(Pvi::new(1500.0, 98.0, 300.0))
            .with_pvi(Pvi::new(2000.0, 101.0, 0.0))
    }

    #[test]
    fn test_remove_shifts_indices() {
        let mut def = sample();
        let removed = def.remove_pvi(0).unwrap();
        assert_eq!(removed.station, 1000.0);
        assert_eq!(def.pvis[0].station, 1500.0);
        assert_eq!(def.len(), 2);
        assert!(def.remove_pvi(5).is_err());
    }

    #[test]
    fn test_insert_and_edit() {
        let mut def = sample();
        def.insert_pvi(1, Pvi::new(1250.0, 99.0, 0.0)).unwrap();
        assert_eq!(def.pvis[1].station, 1250.0);
        assert!(def.insert_pvi(10, Pvi::new(0.0, 0.0, 0.0)).is_err());

        def.pvi_mut(1).unwrap().curve_length = 50.0;
        assert_eq!(def.pvis[1].curve_length, 50.0);
        assert!(def.pvi_mut(9).is_none());
    }

    #[test]
    fn test_station_order() {
        let mut def = sample();
        assert!(def.check_station_order().is_ok());
        def.add_pvi(Pvi::new(2000.0, 102.0, 0.0));
        assert!(def.check_station_order().is_ok());
        def.add_pvi(Pvi::new(1900.0, 102.0, 0.0));
        assert!(matches!(
            def.check_station_order(),
            Err(RhError::NonMonotonicStations { index: 4, .. })
        ));
    }

    #[test]
    fn test_null_grade_is_undefined() {
        let def: ProfileDefinition =
            serde_json::from_str(r#"{"beginning_grade": null, "ending_grade": 2.0}"#).unwrap();
        assert!(def.beginning_grade.is_nan());
        assert_eq!(def.ending_grade, 2.0);
        assert!(def.is_empty());

        let def: ProfileDefinition = serde_json::from_str("{}").unwrap();
        assert!(def.beginning_grade.is_nan());
    }
}
