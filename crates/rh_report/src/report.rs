// crates/rh_report/src/report.rs

//! 设计汇总报告
//!
//! 只做整理与格式化，不做任何计算。输入长度不一致视为调用方违约。

use rh_drainage::{CascadeSummary, Inlet, InletResult, RainfallCoefficients, RainfallSelection, StructureType};
use rh_foundation::{RhError, RhResult};
use rh_profile::{format_grade, format_station, CurveSegment, Extremum, ExtremumKind, ProfileDerived};
use std::fmt;

/// 雨水口汇总行
#[derive(Debug, Clone, PartialEq)]
pub struct InletRow {
    /// 雨水口编号
    pub str_id: String,
    /// 结构形式
    pub structure_type: StructureType,
    /// 桩号
    pub station: f64,
    /// 是否为低点
    pub is_low_point: bool,
    /// 计算结果
    pub result: InletResult,
}

/// 设计汇总报告（只读）
#[derive(Debug, Clone, PartialEq)]
pub struct DesignReport {
    /// 降雨选择
    pub selection: RainfallSelection,
    /// IDF 系数
    pub coefficients: RainfallCoefficients,
    /// 竖曲线表
    pub curves: Vec<CurveSegment>,
    /// 低点与高点
    pub extrema: Vec<Extremum>,
    /// 雨水口表
    pub inlets: Vec<InletRow>,
    /// 级联汇总
    pub summary: CascadeSummary,
    /// 文字说明
    pub narrative: String,
}

/// 报告组装器
pub struct ReportAssembler;

impl ReportAssembler {
    /// 组装报告
    pub fn assemble(
        profile: &ProfileDerived,
        inlets: &[Inlet],
        results: &[InletResult],
        selection: &RainfallSelection,
    ) -> RhResult<DesignReport> {
        if inlets.len() != results.len() {
            return Err(RhError::size_mismatch("inlet_results", inlets.len(), results.len()));
        }

        let rows: Vec<InletRow> = inlets
            .iter()
            .zip(results)
            .map(|(inlet, result)| InletRow {
                str_id: inlet.str_id.clone(),
                structure_type: inlet.structure_type,
                station: inlet.station,
                is_low_point: inlet.is_low_point(),
                result: *result,
            })
            .collect();

        let curves = profile.resolved.curves.clone();
        let extrema: Vec<Extremum> = curves.iter().filter_map(|c| c.extremum).collect();
        let summary = CascadeSummary::from_results(results);
        let narrative = narrative(selection, profile, &extrema, &rows, &summary);

        Ok(DesignReport {
            selection: *selection,
            coefficients: selection.coefficients(),
            curves,
            extrema,
            inlets: rows,
            summary,
            narrative,
        })
    }
}

fn narrative(
    selection: &RainfallSelection,
    profile: &ProfileDerived,
    extrema: &[Extremum],
    rows: &[InletRow],
    summary: &CascadeSummary,
) -> String {
    let c = selection.coefficients();
    let mut text = format!(
        "降雨选择: {} (a={}, b={}, c={})。",
        selection, c.a, c.b, c.c
    );

    if profile.is_tangent_only() {
        text.push_str("纵断面无变坡点，按单一切线处理。");
    } else {
        let lows: Vec<String> = extrema
            .iter()
            .filter(|e| e.kind == ExtremumKind::Low)
            .map(|e| format!("STA {} EL {:.2}", format_station(e.station), e.elevation))
            .collect();
        let highs = extrema.iter().filter(|e| e.kind == ExtremumKind::High).count();
        text.push_str(&format!(
            "纵断面共 {} 个变坡点，高点 {} 处，低点 {} 处",
            profile.resolved.curves.len(),
            highs,
            lows.len()
        ));
        if lows.is_empty() {
            text.push('。');
        } else {
            text.push_str(&format!("（{}）。", lows.join("；")));
        }
    }

    if rows.is_empty() {
        text.push_str("未布置雨水口。");
        return text;
    }

    text.push_str(&format!(
        "雨水口 {} 个，直接汇水流量合计 {:.3} cfs，截流合计 {:.3} cfs，末端旁通 {:.3} cfs",
        summary.inlet_count, summary.total_direct_flow, summary.total_intercepted, summary.final_bypass
    ));
    match summary.max_flooding_index.and_then(|i| rows.get(i)) {
        Some(row) => text.push_str(&format!(
            "；最大积水宽度 {:.2} ft，位于雨水口 {}。",
            summary.max_flooding_width, row.str_id
        )),
        None => text.push('。'),
    }
    text
}

/// CSV 表头
const CSV_HEADER: [&str; 12] = [
    "str_id",
    "structure",
    "station",
    "low_point",
    "tc_min",
    "intensity_in_hr",
    "q_area_cfs",
    "q_bypass_in_cfs",
    "q_total_cfs",
    "qi_cfs",
    "q_bypass_out_cfs",
    "flooding_width_ft",
];

fn csv_error(err: impl fmt::Display) -> RhError {
    RhError::serialization(format!("CSV 输出失败: {}", err))
}

impl DesignReport {
    /// 雨水口表导出为 CSV
    pub fn to_csv(&self) -> RhResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER).map_err(csv_error)?;
        for row in &self.inlets {
            let r = &row.result;
            writer
                .write_record([
                    row.str_id.clone(),
                    row.structure_type.to_string(),
                    format!("{:.2}", row.station),
                    row.is_low_point.to_string(),
                    format!("{:.4}", r.time_of_concentration),
                    format!("{:.4}", r.intensity),
                    format!("{:.4}", r.q_from_area),
                    format!("{:.4}", r.q_bypass_in),
                    format!("{:.4}", r.q_total),
                    format!("{:.4}", r.intercepted_flow),
                    format!("{:.4}", r.q_bypass_out),
                    format!("{:.4}", r.flooding_width),
                ])
                .map_err(csv_error)?;
        }

        let bytes = writer.into_inner().map_err(csv_error)?;
        String::from_utf8(bytes).map_err(csv_error)
    }
}

impl fmt::Display for DesignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== 纵断面 ===")?;
        if self.curves.is_empty() {
            writeln!(f, "  (无变坡点)")?;
        } else {
            writeln!(
                f,
                "  {:>3} {:>10} {:>9} {:>8} {:>8} {:>8} {:>10} {:>9} {:>10}",
                "#", "PVI", "EL", "L", "G_in", "G_out", "BVC", "EL_BVC", "EVC"
            )?;
            for (i, c) in self.curves.iter().enumerate() {
                writeln!(
                    f,
                    "  {:>3} {:>10} {:>9.2} {:>8.2} {:>8} {:>8} {:>10} {:>9.2} {:>10}",
                    i + 1,
                    format_station(c.pvi_station),
                    c.pvi_elevation,
                    c.curve_length,
                    format_grade(c.grade_in),
                    format_grade(c.grade_out),
                    format_station(c.bvc_station),
                    c.bvc_elevation,
                    format_station(c.evc_station),
                )?;
            }
            for e in &self.extrema {
                let kind = match e.kind {
                    ExtremumKind::Low => "低点",
                    ExtremumKind::High => "高点",
                };
                writeln!(f, "  {}: STA {}, EL {:.2}", kind, format_station(e.station), e.elevation)?;
            }
        }

        writeln!(f, "\n=== 雨水口 ({}) ===", self.selection)?;
        writeln!(
            f,
            "  {:>6} {:>10} {:>4} {:>6} {:>6} {:>7} {:>7} {:>7} {:>7} {:>7} {:>6}",
            "ID", "STA", "SAG", "TC", "I", "Q_area", "Q_in", "Q_tot", "Qi", "Q_out", "T"
        )?;
        for row in &self.inlets {
            let r = &row.result;
            writeln!(
                f,
                "  {:>6} {:>10} {:>4} {:>6.2} {:>6.3} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>6.2}",
                row.str_id,
                format_station(row.station),
                if row.is_low_point { "Y" } else { "N" },
                r.time_of_concentration,
                r.intensity,
                r.q_from_area,
                r.q_bypass_in,
                r.q_total,
                r.intercepted_flow,
                r.q_bypass_out,
                r.flooding_width
            )?;
        }

        writeln!(f, "\n{}", self.narrative)
    }
}
