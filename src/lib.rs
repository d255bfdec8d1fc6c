pub mod testcase;
