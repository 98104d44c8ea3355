use crate::{
    nmea::{parse_lines, parse_sentence, time_of_day_ms},
    prelude::{normalize, Error, FixQuality, GpsData},
    tests::init_logger,
};

const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
const RMC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";

fn approx(lhs: f64, rhs: f64, tol: f64) -> bool {
    (lhs - rhs).abs() < tol
}

#[test]
fn gga_sentence() {
    init_logger();

    let gga = match parse_sentence(GGA).unwrap() {
        GpsData::Gga(gga) => gga,
        data => panic!("unexpected {:?}", data),
    };

    assert_eq!(gga.time, 45_319_000);
    assert!(approx(gga.latitude, 48.1173, 1.0E-6));
    assert!(approx(gga.longitude, 11.516_666, 1.0E-5));
    assert_eq!(gga.latitude_hemi, 'N');
    assert_eq!(gga.longitude_hemi, 'E');
    assert!(approx(gga.altitude, 545.4, 1.0E-3));
    assert_eq!(gga.altitude_unit, 'M');
    assert_eq!(gga.fix_quality, 1);
    assert_eq!(gga.satellites, 8);

    let fix = normalize(&GpsData::Gga(gga)).unwrap().data.fix.unwrap();
    assert_eq!(fix.quality, FixQuality::Gps);
    assert_eq!(fix.latitude_deg, gga.latitude);
}

#[test]
fn rmc_sentence() {
    init_logger();

    let rmc = match parse_sentence(&format!("{}\r\n", RMC)).unwrap() {
        GpsData::Rmc(rmc) => rmc,
        data => panic!("unexpected {:?}", data),
    };

    assert_eq!(rmc.time, 45_319_000);
    assert_eq!(rmc.status, 'A');
    assert!(approx(rmc.speed as f64, 22.4 * 0.514_444, 1.0E-3));
    assert!(approx(rmc.bearing as f64, 84.4, 1.0E-3));

    let fix = normalize(&GpsData::Rmc(rmc)).unwrap().data.fix.unwrap();
    let (y, m, d, hh, mm, ss, ns) = fix.epoch.unwrap().to_gregorian_utc();
    assert_eq!(y % 100, 94);
    assert_eq!((m, d, hh, mm, ss, ns), (3, 23, 12, 35, 19, 0));
}

#[test]
fn bad_checksum() {
    let sentence = GGA.replace("*47", "*48");
    assert!(matches!(parse_sentence(&sentence), Err(Error::Nmea(_))));
}

#[test]
fn incomplete_sentence() {
    assert!(parse_sentence("").is_err());
    assert!(parse_sentence("GPGGA").is_err());
}

#[test]
fn many_lines() {
    let content = format!("{}\r\n\r\n{}\r\n", GGA, RMC);
    let reports = parse_lines(&content).collect::<Vec<_>>();
    assert_eq!(reports.len(), 2);
    assert!(matches!(reports[0], Ok(GpsData::Gga(_))));
    assert!(matches!(reports[1], Ok(GpsData::Rmc(_))));
}

#[test]
fn time_of_day() {
    assert_eq!(time_of_day_ms(12, 35, 19.0), 45_319_000);
    assert_eq!(time_of_day_ms(12, 35, 19.5), 45_319_500);
    assert_eq!(time_of_day_ms(0, 0, 0.123), 123);
    assert_eq!(time_of_day_ms(23, 59, 59.9996), 86_399_999);
    assert_eq!(time_of_day_ms(12, 35, 19.9999), 45_319_999);
}
