use crate::domain::model::{DeliveryBatch, FleetSpec, Package};
use crate::utils::error::{CourierError, Result};
use std::str::FromStr;

/// 解析批次輸入：
///
/// ```text
/// base_cost package_count
/// id weight distance [offer_code]   (package_count 行)
/// vehicle_count max_speed max_carriable_weight
/// ```
///
/// 空白行略過，車隊行之後的內容忽略。數值只做格式檢查，範圍驗證交給核心。
pub fn parse_batch(input: &str) -> Result<DeliveryBatch> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_no, header) = lines.next().ok_or_else(|| CourierError::InputError {
        line: 1,
        message: "input is empty, expected `base_cost package_count`".to_string(),
    })?;
    let fields = split_fields(header, line_no, 2, 2)?;
    let base_cost: f64 = parse_field(fields[0], "base cost", line_no)?;
    let package_count: usize = parse_field(fields[1], "number of packages", line_no)?;

    // 筆數來自輸入，不可用來預先配置
    let mut packages = Vec::new();
    let mut last_line = line_no;
    for expected in 1..=package_count {
        let (line_no, line) = lines.next().ok_or_else(|| CourierError::InputError {
            line: last_line + 1,
            message: format!(
                "expected {} package lines but input ended after {}",
                package_count,
                expected - 1
            ),
        })?;
        packages.push(parse_package(line, line_no)?);
        last_line = line_no;
    }

    let (line_no, fleet_line) = lines.next().ok_or_else(|| CourierError::InputError {
        line: last_line + 1,
        message: "missing `vehicle_count max_speed max_carriable_weight` line".to_string(),
    })?;
    let fields = split_fields(fleet_line, line_no, 3, 3)?;
    let fleet = FleetSpec {
        vehicle_count: parse_field(fields[0], "number of vehicles", line_no)?,
        max_speed: parse_field(fields[1], "max speed", line_no)?,
        max_carriable_weight: parse_field(fields[2], "max carriable weight", line_no)?,
    };

    let trailing = lines.count();
    if trailing > 0 {
        tracing::debug!("Ignoring {} line(s) after the fleet line", trailing);
    }

    Ok(DeliveryBatch {
        base_cost,
        packages,
        fleet,
    })
}

fn parse_package(line: &str, line_no: usize) -> Result<Package> {
    let fields = split_fields(line, line_no, 3, 4)?;
    let offer_code = fields.get(3).map(|code| code.to_string());

    Ok(Package {
        id: fields[0].to_string(),
        weight: parse_field(fields[1], "weight", line_no)?,
        distance: parse_field(fields[2], "distance", line_no)?,
        offer_code,
    })
}

fn split_fields(line: &str, line_no: usize, min: usize, max: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < min || fields.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        };
        return Err(CourierError::InputError {
            line: line_no,
            message: format!("expected {} fields, found {}", expected, fields.len()),
        });
    }
    Ok(fields)
}

fn parse_field<T: FromStr>(raw: &str, name: &str, line_no: usize) -> Result<T> {
    raw.parse().map_err(|_| CourierError::InputError {
        line: line_no,
        message: format!("{} '{}' is not a valid number", name, raw),
    })
}
