/*!
# Graduate-Study Budget Simulator

A browser-based personal financial planning spreadsheet, built in Rust.

## Overview

This application models a two-year graduate-study budget: fixed yearly costs
(tuition, insurance, living expenses), two education loans with different
coverage shares, and a month-by-month cash-flow simulation that tracks when
the secondary loan must be drawn to cover shortfalls, accruing monthly
interest on the running balance.

The table is seeded once from the plan constants, freely editable in the
browser grid for the session, and recomputed in full on every edit.

## Architecture

The application follows a client-server architecture:

### Frontend Layer
- **Technologies**: HTML, CSS, JavaScript
- **Key Components**:
  - Editable grid over the monthly budget table
  - Summary panel with yearly totals and loan constants
  - Two time-series charts (cumulative borrowed, net balance)
  - Spreadsheet download button

### Backend Layer
- **Technologies**: Rust, axum
- **Core Components**:
  - Table Seeder - Builds the default month rows from the plan constants
  - Cash-Flow Simulator - The month-by-month loan/interest/balance recurrence
  - Exporter - CSV and XLSX renditions of the annotated table
  - Chart Renderer - PNG line charts of the two time series

## Modules

- **row**: `Month` and `MonthRow` data types and the table column order
- **plan**: fixed budget constants and the table seeder
- **simulator**: the cash-flow recurrence and aggregate totals
- **downloader**: export functionality (CSV, XLSX)
- **graph**: chart generation from the annotated table
- **app**: routing and shared session state

## REST API Endpoints

- `GET /api/table` - The annotated table and totals
- `POST /api/table` - Replace the table with edited rows and recompute
- `POST /api/reset` - Reseed the table from the constants
- `GET /api/summary` - Yearly totals, per-semester amounts, loan constants
- `GET /api/export`, `GET /api/export.csv` - Spreadsheet downloads
- `GET /api/chart/borrowed`, `GET /api/chart/balance` - PNG charts
*/

// Re-export all modules so they appear in the documentation
pub mod app;
pub mod downloader;
pub mod graph;
pub mod plan;
pub mod row;
pub mod simulator;

/// Re-export everything from these modules to make it easier to use
pub use downloader::*;
pub use graph::*;
pub use plan::*;
pub use row::*;
pub use simulator::*;
