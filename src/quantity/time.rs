quantity!(Milliseconds, f64, " ms");
