/*!

This is the long-form manual for `topsis` and `topsisrank`.

## Input

The input is a table with one header row and one row per treatment. The
following formats are supported:
* `xlsx` Excel workbooks (`xls`, `xlsm` and `ods` files are read the same way)
* `csv` Comma Separated Values
* `tsv` Tab Separated Values

The type is inferred from the extension of the file when `--input-type` is not given.
When a workbook has several worksheets, the name of the worksheet should be given
with `--excel-worksheet-name`. Otherwise the first one is used.

The table must contain a treatment column (`Treatment` by default). Each trait is
described by up to three columns:

| Treatment | Gall | Gall-wgt | Gall-drc | SL  | SL-wgt | SL-drc |
|-----------|------|----------|----------|-----|--------|--------|
| Control   | 42   | 0.6      | -        | 3.1 | 0.4    | +      |
| Extract A | 12   | 0.6      | -        | 4.5 | 0.4    | +      |

- the value column holds the measured value. Cells that are not numbers are scored as 0.
- the weight column (optional) holds the weight of the trait. The mean of the numeric
  cells is used, so a constant column is the usual way to write it.
- the direction column (optional) holds `+` when higher values are better and `-` when
  lower values are better. Only the first character of each cell is read. When the
  rows disagree, or when the column is missing, higher values are preferred.

All the column names are compared without regard to case or surrounding spaces.
A trait whose value column is missing is skipped with a warning.

## Weights

- when no trait has a weight, all the traits get the same weight.
- when some traits have a weight, the weights are divided by their sum. The traits
  without a weight get a weight of 0: they do not contribute to the score.

## Configuration

All the options can be given in a JSON file passed with `--config`:

```json
{
  "inputSettings": {
    "filePath": "Input.xlsx",
    "excelWorksheetName": "Sheet3",
    "treatmentColumn": "Treatment"
  },
  "outputSettings": {
    "outputDirectory": "v1",
    "textFileName": "scored_results.txt",
    "excelFileName": "scored_results.xlsx",
    "chartFileName": "composite_scores.png",
    "generateChart": true,
    "chartWidth": 2000,
    "chartHeight": 1600,
    "summaryRows": 10
  },
  "traits": [
    { "name": "RF", "weightColumn": "RF-wgt", "directionColumn": "RF-drc" },
    { "name": "Egg Masses", "valueColumn": "Egg Masses" }
  ]
}
```

Relative paths are resolved from the directory of the configuration file. The
command line options take precedence over the file. Without a configuration, the
traits `RF`, `Eggs`, `Egg Masses`, `Gall`, `SDW`, `SFW`, `RFW` and `SL` are looked
for, with the `-wgt` and `-drc` suffixes for their weight and direction columns.
The `--traits` option replaces this list:

```bash
topsisrank -i Input.xlsx --excel-worksheet-name Sheet3 --traits Gall,Eggs,SL --out results
```

## Output

- `scored_results.txt`: tab-separated, with the treatment, `composite_score`, `rank`,
  then `<trait>_norm` and `<trait>_weighted` for each trait. Numbers are written with
  6 decimals, missing values as `NA`.
- `scored_results.xlsx`: the same table in the `Results` sheet, and the final weights
  and directions in the `Weights` sheet.
- `composite_scores.png`: the composite scores as a horizontal bar chart, best first.
  Drawing the chart needs a sans-serif font installed on the system. Set
  `generateChart` to `false` to skip it.

The 10 best treatments are also printed on the console. With `--reference`, the text
output is compared with a previous output and the differences are printed.

*/
