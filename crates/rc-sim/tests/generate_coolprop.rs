use chrono::NaiveDate;
use rc_cycle::CycleEngine;
use rc_fluids::CoolPropModel;
use rc_sim::{EquipmentSpec, Generator, GeneratorConfig, Status};

fn chamber(id: &str, setpoint_c: f64, mass_flow: f64) -> EquipmentSpec {
    EquipmentSpec {
        id: id.into(),
        interior_setpoint_c: setpoint_c,
        mass_flow_kgps: mass_flow,
        refrigerant: "R134a".into(),
        superheat_k: 0.0,
        subcooling_k: 0.0,
    }
}

fn generator(seed: u64) -> Generator {
    let start = NaiveDate::from_ymd_opt(2025, 7, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut config = GeneratorConfig::new(start);
    config.days = 2;
    config.step_hours = 4;
    config.seed = seed;
    Generator::new(
        config,
        vec![
            chamber("CAMARA_01_CARNES", -18.0, 0.12),
            chamber("CAMARA_02_LACTEOS", 4.0, 0.08),
            chamber("CAMARA_03_VERDURAS", 4.0, 0.08),
        ],
    )
    .unwrap()
}

#[test]
fn generates_classified_records() {
    let model = CoolPropModel::serialized();
    let engine = CycleEngine::new(&model);
    let generator = generator(42);

    let report = generator.run(&engine);
    assert!(!report.truncated);
    assert_eq!(report.records.len() + report.failed, 36);
    assert!(!report.records.is_empty());

    for pair in report.records.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
    for record in &report.records {
        assert!(record.cop > 0.0);
        assert!(record.compressor_kw > 0.0);
        assert!(record.cooling_kw > record.compressor_kw * 0.5);
        assert!(record.discharge_temp_c > record.condensing_c() - 0.2);
        let q = record.evaporator_quality.unwrap();
        assert!((0.0..1.0).contains(&q));
    }

    let counts = report.status_counts();
    let total: usize = counts.values().sum();
    assert_eq!(total, report.records.len());
    assert!(counts.keys().all(|s| Status::ALL.contains(s)));
}

#[test]
fn colder_chamber_needs_more_work_per_kw_cooling() {
    let model = CoolPropModel::serialized();
    let engine = CycleEngine::new(&model);
    let report = generator(7).run(&engine);

    let mean_cop = |id: &str| {
        let cops: Vec<f64> = report
            .records
            .iter()
            .filter(|r| r.equipment_id == id)
            .map(|r| r.cop)
            .collect();
        cops.iter().sum::<f64>() / cops.len() as f64
    };
    assert!(mean_cop("CAMARA_01_CARNES") < mean_cop("CAMARA_02_LACTEOS"));
}

#[test]
fn reruns_are_identical() {
    let model = CoolPropModel::serialized();
    let engine = CycleEngine::new(&model);
    let a = generator(3).run(&engine);
    let b = generator(3).run(&engine);
    assert_eq!(a.records, b.records);
}
