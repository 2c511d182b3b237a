//! # Drive Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::eqpt::joystick::JoystickFrame;
use teleop_lib::{
    drive_ctrl::{mix, shape, DriveCtrl, Params},
    hal::sim::SimMech,
};

fn drive_ctrl_benchmark(c: &mut Criterion) {
    // A sweep of joystick samples covering every mixing branch and the
    // trigger
    let frames: Vec<JoystickFrame> = (0..100)
        .map(|i| {
            let t = i as f64 / 50.0 - 1.0;
            JoystickFrame {
                x: t,
                y: -t * 0.8,
                z: (t * 3.0).sin(),
                buttons: vec![i % 10 == 0],
            }
        })
        .collect();

    c.bench_function("shape + mix", |b| {
        b.iter(|| {
            for f in frames.iter() {
                black_box(mix(
                    shape(black_box(f.x), 0.2),
                    shape(black_box(f.y), 0.2),
                    shape(black_box(f.z), 0.2),
                ));
            }
        })
    });

    let mut ctrl = DriveCtrl::new(Params::default());
    let mut mech = SimMech::new();

    c.bench_function("DriveCtrl::cycle", |b| {
        b.iter(|| {
            for f in frames.iter() {
                ctrl.cycle(f, &mut mech);
            }
            mech.take_calls();
        })
    });
}

criterion_group!(benches, drive_ctrl_benchmark);
criterion_main!(benches);
