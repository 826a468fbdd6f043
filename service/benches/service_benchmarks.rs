//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for the session host's line I/O

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use storyhost_service::{ServerConfig, ServerMetrics, SessionAdmission, SessionEnd, TelnetInputProcessor};
use tokio::io::{AsyncWriteExt, duplex};
use tokio::runtime::Runtime;

fn bench_read_lines(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("processor_read_lines");

    for lines in [1usize, 10, 100] {
        let input = b"look at the old gate\r\n".repeat(lines);
        group.throughput(Throughput::Bytes(input.len() as u64));
        for echo in [false, true] {
            let name = if echo { "echo" } else { "silent" };
            group.bench_with_input(BenchmarkId::new(name, lines), &input, |b, input| {
                b.to_async(&rt).iter(|| async move {
                    let (server, mut client) = duplex(64 * 1024);
                    let mut processor = TelnetInputProcessor::new(server, echo);
                    client.write_all(input).await.unwrap();
                    for _ in 0..lines {
                        black_box(processor.read_line().await.unwrap());
                    }
                });
            });
        }
    }

    group.finish();
}

fn bench_write_lines(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let response = "The courtyard is quiet.\nA lantern sways by the gate.";

    c.bench_function("processor_write_line", |b| {
        b.to_async(&rt).iter(|| async move {
            let (server, _client) = duplex(64 * 1024);
            let mut processor = TelnetInputProcessor::new(server, true);
            for _ in 0..10 {
                processor.write_line(black_box(response)).await.unwrap();
            }
        });
    });
}

fn bench_admission_and_metrics(c: &mut Criterion) {
    let admission = SessionAdmission::new(ServerConfig::default().max_sessions);
    let metrics = ServerMetrics::new();

    c.bench_function("admit_and_release", |b| {
        b.iter(|| {
            let slot = black_box(admission.try_acquire());
            metrics.session_accepted();
            drop(slot);
            metrics.session_ended(SessionEnd::ClientQuit, Duration::from_secs(1));
        })
    });

    c.bench_function("metrics_snapshot", |b| b.iter(|| black_box(metrics.snapshot())));
}

criterion_group!(
    benches,
    bench_read_lines,
    bench_write_lines,
    bench_admission_and_metrics
);
criterion_main!(benches);
