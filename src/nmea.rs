//! NMEA 0183 sentence ingestion
use log::debug;
use nmea0183::{GPSQuality, ParseResult, Parser, GGA, RMC};

use crate::{
    constants::KNOTS_TO_M_S,
    prelude::{Error, GgaData, GpsData, GpsUtcTime, RmcData},
    time::utc_midnight_ms,
};

/// Time of day in ms. Fractional seconds never round up into the next second.
pub(crate) fn time_of_day_ms(hours: u8, minutes: u8, seconds: f32) -> GpsUtcTime {
    let last_ms = seconds.trunc() as i64 * 1_000 + 999;
    let millis = ((seconds as f64 * 1.0E3).round() as i64).min(last_ms);
    hours as i64 * 3_600_000 + minutes as i64 * 60_000 + millis
}

fn fix_quality(quality: &GPSQuality) -> u8 {
    match quality {
        GPSQuality::NoFix => 0,
        GPSQuality::GPS => 1,
        GPSQuality::DGPS => 2,
        GPSQuality::PPS => 3,
        GPSQuality::RTK => 4,
        GPSQuality::FRTK => 5,
        GPSQuality::Estimated => 6,
        GPSQuality::Manual => 7,
        GPSQuality::Simulated => 8,
    }
}

fn latitude_hemi(latitude: f64) -> char {
    if latitude < 0.0 {
        'S'
    } else {
        'N'
    }
}

fn longitude_hemi(longitude: f64) -> char {
    if longitude < 0.0 {
        'W'
    } else {
        'E'
    }
}

fn gga_data(gga: &GGA) -> GgaData {
    let (latitude, longitude) = (gga.latitude.as_f64(), gga.longitude.as_f64());
    GgaData {
        time: time_of_day_ms(gga.time.hours, gga.time.minutes, gga.time.seconds),
        latitude,
        latitude_hemi: latitude_hemi(latitude),
        longitude,
        longitude_hemi: longitude_hemi(longitude),
        altitude: gga.altitude.meters as f64,
        altitude_unit: 'M',
        fix_quality: fix_quality(&gga.gps_quality),
        satellites: gga.sat_in_use,
        hdop: gga.hdop,
        horizontal_accuracy: 0.0,
        vertical_accuracy: 0.0,
    }
}

fn rmc_data(rmc: &RMC) -> Result<RmcData, Error> {
    let (latitude, longitude) = (rmc.latitude.as_f64(), rmc.longitude.as_f64());
    let (date, time) = (&rmc.datetime.date, &rmc.datetime.time);
    Ok(RmcData {
        time: time_of_day_ms(time.hours, time.minutes, time.seconds),
        status: 'A',
        latitude,
        latitude_hemi: latitude_hemi(latitude),
        longitude,
        longitude_hemi: longitude_hemi(longitude),
        speed: (rmc.speed.as_knots() as f64 * KNOTS_TO_M_S) as f32,
        bearing: rmc.course.as_ref().map(|c| c.degrees).unwrap_or_default(),
        date: utc_midnight_ms(date.year as i32, date.month, date.day)?,
        horizontal_accuracy: 0.0,
        vertical_accuracy: 0.0,
    })
}

/// Parses one `$xxGGA` or `$xxRMC` sentence into a [GpsData] report.
/// The checksum is verified, trailing CR/LF are optional.
pub fn parse_sentence(line: &str) -> Result<GpsData, Error> {
    let mut parser = Parser::new();
    let mut parsed = None;

    for byte in line.trim_end().bytes().chain(*b"\r\n") {
        if let Some(result) = parser.parse_from_byte(byte) {
            parsed = Some(result);
        }
    }

    match parsed {
        Some(Ok(ParseResult::GGA(Some(gga)))) => Ok(GpsData::Gga(gga_data(&gga))),
        Some(Ok(ParseResult::RMC(Some(rmc)))) => rmc_data(&rmc).map(GpsData::Rmc),
        Some(Ok(ParseResult::GGA(None))) | Some(Ok(ParseResult::RMC(None))) => {
            Err(Error::NoFix)
        },
        Some(Ok(_)) => {
            debug!("unsupported sentence: \"{}\"", line.trim_end());
            Err(Error::UnsupportedFormat)
        },
        Some(Err(e)) => Err(Error::Nmea(e)),
        None => Err(Error::Nmea("incomplete sentence")),
    }
}

/// Parses every non empty line of `content`, see [parse_sentence].
pub fn parse_lines(content: &str) -> impl Iterator<Item = Result<GpsData, Error>> + '_ {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_sentence)
}
