/// Test fixtures: representative payloads from the upstream sources.
///
/// Structurally complete but truncated to the minimum needed to exercise
/// the parsers:
/// - AFD / HWO product pages: HTML with one dominant `<pre>` block and
///   dotted section markers terminated by `&&` / `$$`.
/// - Observation history page: 18-column `<td>` rows, newest first, with
///   trace ("T") and sentinel precipitation cells.
/// - api.weather.gov hourly forecast / alerts: GeoJSON-flavored envelopes
///   with the data under `properties`.
/// - Sensor device endpoint: newest-first array of flat records.

/// Area Forecast Discussion page. Synopsis and near-term present, each
/// terminated by `&&`; short-term follows so near-term has a real boundary.
pub(crate) fn fixture_afd_html() -> &'static str {
    r#"<html><head><title>AFD Product</title></head><body>
<pre class="glossaryProduct">
Area Forecast Discussion
National Weather Service Lincoln IL
1130 AM CDT Fri Aug 28 2026

.SYNOPSIS...
High pressure builds in from the west today behind a departing
cold front. Dry and seasonable conditions persist through the
weekend with light northwest flow aloft.

&&

.NEAR TERM /THROUGH TONIGHT/...
Winds diminish this evening with mostly clear skies expected
overnight. Lows in the mid 50s.

&&

.SHORT TERM /SATURDAY THROUGH TUESDAY/...
Warming trend begins Tuesday as heights rise.

&&

$$
</pre>
</body></html>"#
}

/// Hazardous Weather Outlook with nothing going on.
pub(crate) fn fixture_hwo_quiet_html() -> &'static str {
    r#"<html><body>
<pre class="glossaryProduct">
Hazardous Weather Outlook
National Weather Service Lincoln IL

.DAY ONE...Today and Tonight

No hazardous weather is expected at this time.

.DAYS TWO THROUGH SEVEN...Saturday through Thursday

No hazardous weather is expected at this time.

$$
</pre>
</body></html>"#
}

/// Hazardous Weather Outlook with an active winter hazard on day one.
pub(crate) fn fixture_hwo_active_html() -> &'static str {
    r#"<html><body>
<pre class="glossaryProduct">
Hazardous Weather Outlook
National Weather Service Lincoln IL

.DAY ONE...Today and Tonight

A Winter Storm Warning remains in effect. Heavy snow expected
with total accumulations of 6 to 9 inches.

.DAYS TWO THROUGH SEVEN...Saturday through Thursday

Quieter weather expected.

$$
</pre>
</body></html>"#
}

/// Observation history table. Day 28 is "today" (four rows, newest first),
/// day 27 is "yesterday" (two rows). Columns follow the fixed 18-column
/// layout; precipitation cells include a trace ("T") and an out-of-range
/// sentinel (15.0) that must both be excluded from daily sums.
pub(crate) fn fixture_obhistory_html() -> &'static str {
    r#"<html><body>
<table cellspacing="3" cellpadding="2" border="0">
<tr><td>28</td><td>11:54</td><td>SW 12 G 18</td><td>10.00</td><td>Partly Cloudy</td><td>FEW070</td><td>72</td><td>58</td><td>73</td><td>55</td><td>61%</td><td>NA</td><td>NA</td><td>29.92</td><td>1013.2</td><td></td><td></td><td></td></tr>
<tr><td>28</td><td>10:54</td><td>SW 10</td><td>10.00</td><td>Light Rain</td><td>BKN050</td><td>68</td><td>58</td><td>70</td><td>55</td><td>70%</td><td>NA</td><td>NA</td><td>29.90</td><td>1012.5</td><td>0.10</td><td>0.10</td><td></td></tr>
<tr><td>28</td><td>09:54</td><td>S 8</td><td>8.00</td><td>Light Rain</td><td>OVC045</td><td>66</td><td>59</td><td>68</td><td>55</td><td>78%</td><td>NA</td><td>NA</td><td>29.89</td><td>1012.1</td><td>0.05</td><td></td><td></td></tr>
<tr><td>28</td><td>08:54</td><td>S 6</td><td>7.00</td><td>Drizzle</td><td>OVC040</td><td>64</td><td>59</td><td>66</td><td>55</td><td>84%</td><td>NA</td><td>NA</td><td>29.88</td><td>1011.8</td><td>T</td><td></td><td></td></tr>
<tr><td>27</td><td>23:54</td><td>SE 7</td><td>10.00</td><td>Rain</td><td>OVC035</td><td>61</td><td>57</td><td>64</td><td>55</td><td>87%</td><td>NA</td><td>NA</td><td>29.95</td><td>1014.0</td><td>0.25</td><td>0.40</td><td></td></tr>
<tr><td>27</td><td>22:54</td><td>SE 9</td><td>10.00</td><td>Overcast</td><td>OVC035</td><td>62</td><td>57</td><td>64</td><td>55</td><td>84%</td><td>NA</td><td>NA</td><td>29.97</td><td>1014.6</td><td>15.0</td><td></td><td></td></tr>
</table>
</body></html>"#
}

/// Hourly gridpoint forecast with three periods. The third period carries a
/// null probabilityOfPrecipitation value (common overnight).
pub(crate) fn fixture_hourly_forecast_json() -> &'static str {
    r#"{
      "properties": {
        "updated": "2026-08-28T11:00:00+00:00",
        "periods": [
          {
            "number": 1,
            "startTime": "2026-08-28T08:00:00-05:00",
            "endTime": "2026-08-28T09:00:00-05:00",
            "temperature": 52,
            "temperatureUnit": "F",
            "windSpeed": "10 to 20 mph",
            "windDirection": "SW",
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 20 },
            "shortForecast": "Mostly Sunny"
          },
          {
            "number": 2,
            "startTime": "2026-08-28T09:00:00-05:00",
            "endTime": "2026-08-28T10:00:00-05:00",
            "temperature": 55,
            "temperatureUnit": "F",
            "windSpeed": "10 mph",
            "windDirection": "SW",
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 40 },
            "shortForecast": "Partly Sunny"
          },
          {
            "number": 3,
            "startTime": "2026-08-28T10:00:00-05:00",
            "endTime": "2026-08-28T11:00:00-05:00",
            "temperature": 58,
            "temperatureUnit": "F",
            "windSpeed": "5 mph",
            "windDirection": "W",
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": null },
            "shortForecast": "Sunny"
          }
        ]
      }
    }"#
}

/// Active alerts feed with two concurrent alerts of different severities.
pub(crate) fn fixture_alerts_json() -> &'static str {
    r#"{
      "features": [
        {
          "properties": {
            "event": "Winter Storm Warning",
            "severity": "Severe",
            "headline": "Winter Storm Warning issued until 6 PM CST Saturday",
            "description": "Heavy snow expected. Total snow accumulations of 6 to 9 inches.",
            "effective": "2026-08-28T06:00:00-06:00",
            "expires": "2026-08-29T18:00:00-06:00",
            "areaDesc": "Peoria; Tazewell; Woodford"
          }
        },
        {
          "properties": {
            "event": "Wind Advisory",
            "severity": "Moderate",
            "headline": "Wind Advisory in effect from noon to 8 PM",
            "description": "Southwest winds 25 to 35 mph with gusts up to 50 mph expected.",
            "effective": "2026-08-28T12:00:00-06:00",
            "expires": "2026-08-28T20:00:00-06:00",
            "areaDesc": "Peoria"
          }
        }
      ]
    }"#
}

/// Sensor device endpoint payload, newest record first. Pressure rises
/// 0.05 inHg across the batch, so the derived trend is rising.
pub(crate) fn fixture_sensor_json() -> &'static str {
    r#"[
      {
        "dateutc": 1756392840000,
        "tempf": 71.6,
        "feelsLike": 72.1,
        "dewPoint": 57.8,
        "humidity": 62,
        "windspeedmph": 11.4,
        "windgustmph": 17.2,
        "winddir": 204,
        "baromrelin": 29.94,
        "uv": 6,
        "dailyrainin": 0.08,
        "yesterdayrainin": 0.31
      },
      {
        "dateutc": 1756392540000,
        "tempf": 71.2,
        "feelsLike": 71.8,
        "dewPoint": 57.9,
        "humidity": 63,
        "windspeedmph": 9.8,
        "windgustmph": 14.5,
        "winddir": 198,
        "baromrelin": 29.91,
        "uv": 6,
        "dailyrainin": 0.08,
        "yesterdayrainin": 0.31
      },
      {
        "dateutc": 1756392240000,
        "tempf": 70.9,
        "feelsLike": 71.5,
        "dewPoint": 58.0,
        "humidity": 64,
        "windspeedmph": 10.2,
        "windgustmph": 15.0,
        "winddir": 201,
        "baromrelin": 29.89,
        "uv": 5,
        "dailyrainin": 0.06,
        "yesterdayrainin": 0.31
      }
    ]"#
}
